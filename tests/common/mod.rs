#![allow(dead_code)]

use sketch::lang::Error;
use sketch::mach::{DrawCall, Program, Recorder, Runtime};

/// Compile and run, expecting no diagnostics anywhere.
pub fn draw(source: &str) -> Vec<DrawCall> {
    let program = Program::compile(source).unwrap();
    let mut canvas = Recorder::new();
    Runtime::new(program).run(&mut canvas).unwrap();
    canvas.calls
}

/// Compile cleanly, run, and return whatever the run produced.
pub fn draw_errors(source: &str) -> (Vec<DrawCall>, Vec<Error>) {
    let program = Program::compile(source).unwrap();
    let mut canvas = Recorder::new();
    let errors = match Runtime::new(program).run(&mut canvas) {
        Ok(()) => vec![],
        Err(errors) => errors,
    };
    (canvas.calls, errors)
}

pub fn compile_errors(source: &str) -> Vec<Error> {
    match Program::compile(source) {
        Ok(_) => vec![],
        Err(errors) => errors,
    }
}

/// The text written by `write` commands, in order.
pub fn texts(calls: &[DrawCall]) -> Vec<String> {
    calls
        .iter()
        .filter_map(|call| match call {
            DrawCall::WriteText(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}
