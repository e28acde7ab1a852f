mod common;
use common::*;
use sketch::lang::ErrorCode;

#[test]
fn test_poke_then_peek() {
    let source = "array int a 3\nint x\npoke a 0 = 7\npeek x = a 0\nwrite x\n";
    assert_eq!(texts(&draw(source)), ["7"]);
}

#[test]
fn test_elements_start_at_zero() {
    let source = "array real r 2\nreal x = 1\npeek x = r 1\nwrite x\n";
    assert_eq!(texts(&draw(source)), ["0"]);
}

#[test]
fn test_element_coerces_to_declared_kind() {
    let source = "array int a 1\npoke a 0 = 2.9\nint x\npeek x = a 0\nwrite x\n";
    assert_eq!(texts(&draw(source)), ["2"]);
}

#[test]
fn test_subscript_out_of_range_reported_and_run_continues() {
    let (calls, errors) = draw_errors("array int a 2\npoke a 2 = 1\nwrite \"after\"\n");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), ErrorCode::SubscriptOutOfRange);
    assert_eq!(errors[0].line_number(), Some(2));
    assert_eq!(texts(&calls), ["after"]);
}

#[test]
fn test_failed_poke_leaves_array_unchanged() {
    let source = "array int a 2\n\
                  int x\n\
                  poke a 1 = 5\n\
                  poke a 9 = 1\n\
                  peek x = a 1\n\
                  write x\n";
    let (calls, errors) = draw_errors(source);
    assert_eq!(errors[0].code(), ErrorCode::SubscriptOutOfRange);
    assert_eq!(texts(&calls), ["5"]);
}

#[test]
fn test_negative_subscript_rejected() {
    let (_, errors) = draw_errors("array int a 2\npoke a -1 = 1\n");
    assert_eq!(errors[0].code(), ErrorCode::SubscriptOutOfRange);
}

#[test]
fn test_subscript_may_be_an_expression() {
    let source = "array int a 4\nint i = 1\npoke a i + 2 = 9\nint x\npeek x = a 3\nwrite x\n";
    assert_eq!(texts(&draw(source)), ["9"]);
}

#[test]
fn test_non_positive_size_rejected() {
    let (_, errors) = draw_errors("array int a 0\n");
    assert_eq!(errors[0].code(), ErrorCode::IllegalValue);
}

#[test]
fn test_scalar_and_array_misuse_caught_at_compile_time() {
    let errors = compile_errors("int x\npoke x 0 = 1\n");
    assert_eq!(errors[0].code(), ErrorCode::TypeMismatch);
    let errors = compile_errors("array int a 2\na = 1\n");
    assert_eq!(errors[0].code(), ErrorCode::TypeMismatch);
}
