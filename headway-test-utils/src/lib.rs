pub mod error;
pub mod fixtures;
pub mod setup;

pub use error::TestError;
pub use setup::TestSetup;

pub mod prelude {
    pub use crate::{
        fixtures::transit::{self, factory},
        test_setup_with_transit_tables, TestError, TestSetup,
    };
}
