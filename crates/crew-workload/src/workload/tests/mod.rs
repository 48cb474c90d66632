mod common;
mod impact;
mod report;
