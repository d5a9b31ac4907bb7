pub mod notation;
pub mod primitive_parser;
pub mod tab_decoder;
