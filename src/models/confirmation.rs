use serde::Serialize;

/// How a client confirms a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignatureMode {
    Stamp,
    Signature,
}

impl SignatureMode {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SignatureMode::Stamp => "stamp",
            SignatureMode::Signature => "signature",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stamp" => Some(SignatureMode::Stamp),
            "signature" | "sign" => Some(SignatureMode::Signature),
            _ => None,
        }
    }
}

/// Proof attached to a confirmed visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Confirmation {
    Stamp,
    /// Handwritten signature image, raw file bytes.
    #[serde(skip)]
    Signature(Vec<u8>),
}

impl Confirmation {
    /// Rebuild from the `confirmed` / `signature_data` columns.
    pub fn from_columns(confirmed: bool, signature: Option<Vec<u8>>) -> Option<Self> {
        if !confirmed {
            return None;
        }
        match signature {
            Some(bytes) if !bytes.is_empty() => Some(Confirmation::Signature(bytes)),
            _ => Some(Confirmation::Stamp),
        }
    }

    pub fn signature_bytes(&self) -> Option<&[u8]> {
        match self {
            Confirmation::Signature(b) => Some(b),
            Confirmation::Stamp => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Confirmation::Stamp => "stamp",
            Confirmation::Signature(_) => "signature",
        }
    }
}
