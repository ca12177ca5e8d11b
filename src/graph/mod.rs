//! Static-graph mode
//!
//! A [`Program`] records placeholders and comparison nodes without touching
//! device memory. An [`Executor`] binds host feeds to placeholders, runs the
//! nodes in order on its client and returns the fetched outputs.
//!
//! ```ignore
//! let mut program = Program::new();
//! let x = program.data("x", &[-1, 4], DType::F32)?;
//! let y = program.data("y", &[-1, 4], DType::F32)?;
//! let out = program.compare(CompareOp::Lt, &x, &y, &Kwargs::new())?;
//!
//! let exe = Executor::<CustomRuntime>::new(client);
//! let res = exe.run(&program, &Feed::new().with("x", xs).with("y", ys), &[&out])?;
//! ```

mod executor;
mod program;

pub use executor::{Executor, Feed};
pub use program::{Operand, Program, Variable, broadcast_declared};
