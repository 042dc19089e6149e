/// A record source format: detects its own content and splits it into raw records.
pub trait Parser {
    type Output;

    fn parse(content: &str) -> Result<Vec<Self::Output>, String>;

    fn is_supported(filename: Option<&str>, content: &str) -> bool;
}
