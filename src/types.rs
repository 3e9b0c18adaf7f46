pub type RouteIndex = usize;

pub type CapturedParam = (String, String);

/// Payload carried by the terminal node of every route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint<H, M = ()> {
    pub handler: H,
    pub middleware: Option<M>,
    pub order: RouteIndex,
}

impl<H, M> Endpoint<H, M> {
    pub fn new(handler: H, middleware: Option<M>, order: RouteIndex) -> Self {
        Self {
            handler,
            middleware,
            order,
        }
    }
}
