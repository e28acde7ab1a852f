mod common;
use common::*;
use sketch::lang::ErrorCode;

#[test]
fn test_body_skipped_in_sequential_flow() {
    let source = "method f\nwrite \"body\"\nend method\nwrite \"after\"\n";
    assert_eq!(texts(&draw(source)), ["after"]);
}

#[test]
fn test_call_runs_body_then_returns() {
    let source = "call f\nwrite \"after\"\nmethod f\nwrite \"body\"\nend method\n";
    assert_eq!(texts(&draw(source)), ["body", "after"]);
}

#[test]
fn test_parameters_visible_only_inside_the_call() {
    let source = "method f int n\nwrite n\nend method\ncall f 7\nwrite \"done\"\n";
    assert_eq!(texts(&draw(source)), ["7", "done"]);
    let errors = compile_errors("method f int n\nend method\ncall f 1\nwrite n\n");
    assert_eq!(errors[0].code(), ErrorCode::UndefinedVariable);
    assert_eq!(errors[0].line_number(), Some(4));
}

#[test]
fn test_arguments_coerce_to_parameter_kind() {
    let source = "method f int n\nwrite n\nend method\ncall f 2.9\n";
    assert_eq!(texts(&draw(source)), ["2"]);
}

#[test]
fn test_return_slot_carries_the_result() {
    let source = "method int double int n\n\
                  double = n * 2\n\
                  end method\n\
                  call double 21\n\
                  write double\n";
    assert_eq!(texts(&draw(source)), ["42"]);
}

#[test]
fn test_return_slot_resets_on_every_call() {
    let source = "method int pick int n\n\
                  if n > 0\n\
                  pick = n\n\
                  end if\n\
                  end method\n\
                  call pick 5\n\
                  write pick\n\
                  call pick 0\n\
                  write pick\n";
    assert_eq!(texts(&draw(source)), ["5", "0"]);
}

#[test]
fn test_methods_may_call_each_other() {
    let source = "method outer\n\
                  write \"a\"\n\
                  call inner\n\
                  write \"c\"\n\
                  end method\n\
                  method inner\n\
                  write \"b\"\n\
                  end method\n\
                  call outer\n";
    assert_eq!(texts(&draw(source)), ["a", "b", "c"]);
}

#[test]
fn test_outer_parameters_survive_inner_call() {
    let source = "method outer int n\n\
                  write n\n\
                  call inner\n\
                  write n\n\
                  end method\n\
                  method inner\n\
                  write \"x\"\n\
                  end method\n\
                  call outer 5\n";
    assert_eq!(texts(&draw(source)), ["5", "x", "5"]);
}

#[test]
fn test_duplicate_method_rejected() {
    let errors = compile_errors("method f\nend method\nmethod f\nend method\n");
    assert_eq!(errors[0].code(), ErrorCode::DuplicateVariable);
}

#[test]
fn test_method_inside_block_rejected() {
    let errors = compile_errors("if true\nmethod f\nend method\nend if\n");
    assert!(errors
        .iter()
        .any(|e| e.code() == ErrorCode::BlockMismatch && e.line_number() == Some(2)));
}
