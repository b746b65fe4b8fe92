//! Integration tests for the relconf CLI

mod helpers;
mod test_convert;
mod test_init;
mod test_show;
mod test_validate;
