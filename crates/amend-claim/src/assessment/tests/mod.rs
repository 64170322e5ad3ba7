mod common;
mod intake;
mod validation;
