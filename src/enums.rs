/// Request component a pattern node is tested against. The declaration order
/// doubles as the ordering used when two routes diverge on different
/// components at the same depth.
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Segment = 0,
    Query = 1,
    Fragment = 2,
    Method = 3,
    Header = 4,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Segment => "segment",
            Category::Query => "query",
            Category::Fragment => "fragment",
            Category::Method => "method",
            Category::Header => "header",
        }
    }
}
