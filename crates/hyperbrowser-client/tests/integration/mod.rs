pub mod common;

mod services_tests;
mod transport_tests;
