// Error types for identifier generation
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdGenError {
    // Machine identity errors
    NoPrivateAddress,
    InterfaceEnumeration(String),
    ValidationRejected(u16),

    // Encoding errors
    EncodingOverflow { prefix: u64, org_id: u64 },

    // Decoding errors
    MalformedId(u64),
}

impl fmt::Display for IdGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPrivateAddress => write!(f, "no private ip address"),
            Self::InterfaceEnumeration(msg) => {
                write!(f, "failed to enumerate network interfaces: {}", msg)
            }
            Self::ValidationRejected(machine_id) => {
                write!(f, "machine id {} rejected by validator", machine_id)
            }
            Self::EncodingOverflow { prefix, org_id } => {
                write!(f, "id {}{} does not fit in a signed 64-bit integer", prefix, org_id)
            }
            Self::MalformedId(id) => write!(f, "malformed id: {}", id),
        }
    }
}

impl std::error::Error for IdGenError {}

impl IdGenError {
    /// Errors raised while resolving the machine identifier.
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::NoPrivateAddress | Self::InterfaceEnumeration(_))
    }
}

pub type Result<T> = std::result::Result<T, IdGenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(IdGenError::NoPrivateAddress.to_string(), "no private ip address");
        assert_eq!(
            IdGenError::ValidationRejected(288).to_string(),
            "machine id 288 rejected by validator"
        );
        let overflow = IdGenError::EncodingOverflow {
            prefix: 991231,
            org_id: 4398015402240,
        };
        assert!(overflow.to_string().starts_with("id 9912314398015402240"));
    }

    #[test]
    fn test_error_classification() {
        assert!(IdGenError::NoPrivateAddress.is_resolution());
        assert!(IdGenError::InterfaceEnumeration("EPERM".to_string()).is_resolution());
        assert!(!IdGenError::ValidationRejected(1).is_resolution());
        assert!(!IdGenError::MalformedId(1).is_resolution());
    }
}
