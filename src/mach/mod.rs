/*!
## Machine module

The compiled command sequence and the engine that executes it.

*/

mod canvas;
mod command;
mod eval;
mod operation;
mod program;
mod runtime;
mod val;
mod var;

pub use canvas::{Canvas, DrawCall, Recorder};
pub use command::Command;
pub use eval::evaluate;
pub use operation::Operation;
pub use program::{MethodInfo, Program};
pub use runtime::Runtime;
pub use val::Val;
pub use var::Var;

/// Index into the command sequence.
pub type Address = usize;
