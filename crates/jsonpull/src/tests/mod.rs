mod arbitrary;
pub(crate) mod utils;

mod parse_bad;
