//! # Sketch
//!
//! A stored-program interpreter for a small line-oriented drawing language.
//!
//! Source text is compiled one line at a time into an ordered sequence of
//! commands. A program counter dispatches through that sequence; every jump
//! target for `if`, `while`, `for` and `method` blocks is resolved once at
//! compile time. Drawing commands are issued against a [`mach::Canvas`]
//! collaborator, so the core stays agnostic to how anything renders.
//!
//! ```
//! use sketch::mach::{Program, Recorder, Runtime};
//!
//! let program = Program::compile("pen 200 0 0\nmoveto 10 10\ndrawto 90 90\n").unwrap();
//! let mut canvas = Recorder::new();
//! Runtime::new(program).run(&mut canvas).unwrap();
//! assert_eq!(canvas.calls.len(), 3);
//! ```

pub mod lang;
pub mod mach;
