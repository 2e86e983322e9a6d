use runtime::{format_float, Number, DEFAULT_PRECISION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    #[default]
    Expanded,
    Compressed,
}

/// Formatting options threaded through `Node::to_sass`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub style: OutputStyle,
    pub precision: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            style: OutputStyle::Expanded,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Options {
    pub fn compressed() -> Options {
        Options {
            style: OutputStyle::Compressed,
            ..Options::default()
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.style == OutputStyle::Compressed
    }

    pub fn format_number(&self, number: &Number) -> String {
        let mut text = format_float(number.value, self.precision);
        if self.is_compressed() {
            if let Some(rest) = text.strip_prefix("0.") {
                text = format!(".{}", rest);
            } else if let Some(rest) = text.strip_prefix("-0.") {
                text = format!("-.{}", rest);
            }
        }
        format!("{}{}", text, number.unit_str())
    }
}
