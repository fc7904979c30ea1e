pub mod clock;
pub mod configure;
pub mod decode;
pub mod error;
pub mod generator;
pub mod layout;
pub mod logger;
pub mod machine_id;

pub use decode::{decode, extract_id, DecodedId};
pub use error::IdGenError;
pub use generator::{Generator, Options};
pub use layout::Layout;
pub use machine_id::{MachineIdResolver, PrivateIpResolver, StaticMachineId};
