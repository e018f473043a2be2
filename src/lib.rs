#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate serde;

#[macro_use]
pub mod log;
pub mod rr_graph;
pub mod timing;
