mod permission_gate;

pub use permission_gate::*;
