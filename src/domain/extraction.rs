use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    Native,
    Ocr,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::Native => "native",
            ExtractionMethod::Ocr => "ocr",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub text: String,
    pub method: ExtractionMethod,
}

impl ExtractionResult {
    pub fn native(text: String) -> Self {
        Self {
            text,
            method: ExtractionMethod::Native,
        }
    }

    pub fn ocr(text: String) -> Self {
        Self {
            text,
            method: ExtractionMethod::Ocr,
        }
    }
}
