/// Knobs for [`HistoryParser`](super::HistoryParser).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Drop the first line of the input; platform exports start with a
    /// CSV header.
    pub skip_header: bool,
    /// Fail on a hand that has events but never saw a `starting hand` line.
    pub require_start_line: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            skip_header: true,
            require_start_line: false,
        }
    }
}

impl ParserConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_header(mut self, skip_header: bool) -> Self {
        self.skip_header = skip_header;
        self
    }

    pub fn require_start_line(mut self, require_start_line: bool) -> Self {
        self.require_start_line = require_start_line;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::new();
        assert!(config.skip_header);
        assert!(!config.require_start_line);
    }

    #[test]
    fn test_setters() {
        let config = ParserConfig::new()
            .skip_header(false)
            .require_start_line(true);
        assert_eq!(
            ParserConfig {
                skip_header: false,
                require_start_line: true,
            },
            config
        );
    }
}
