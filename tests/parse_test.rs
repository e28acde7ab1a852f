mod common;
use common::*;
use sketch::lang::ErrorCode;

#[test]
fn test_diagnostics_aggregate_across_lines() {
    let errors = compile_errors("int 3\nmoveto q 1\nwrite 2\ncircle\n");
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0].code(), ErrorCode::SyntaxError);
    assert_eq!(errors[0].line_number(), Some(1));
    assert_eq!(errors[1].code(), ErrorCode::UndefinedVariable);
    assert_eq!(errors[1].line_number(), Some(2));
    assert_eq!(errors[2].line_number(), Some(4));
}

#[test]
fn test_mismatched_closer_names_the_open_construct() {
    let errors = compile_errors("while true\nend if\n");
    assert_eq!(errors[0].code(), ErrorCode::BlockMismatch);
    assert!(errors[0].to_string().contains("EXPECTED END WHILE"));
}

#[test]
fn test_unclosed_block_reported_at_its_opening_line() {
    let errors = compile_errors("write 1\nif true\nwrite 2\n");
    assert_eq!(errors[0].code(), ErrorCode::BlockMismatch);
    assert_eq!(errors[0].line_number(), Some(2));
}

#[test]
fn test_else_without_if_rejected() {
    let errors = compile_errors("else\n");
    assert_eq!(errors[0].code(), ErrorCode::BlockMismatch);
}

#[test]
fn test_undeclared_variable_rejected() {
    let errors = compile_errors("write q\n");
    assert_eq!(errors[0].code(), ErrorCode::UndefinedVariable);
}

#[test]
fn test_duplicate_declaration_rejected() {
    let errors = compile_errors("int x\nreal x\n");
    assert_eq!(errors[0].code(), ErrorCode::DuplicateVariable);
    assert_eq!(errors[0].line_number(), Some(2));
}

#[test]
fn test_keywords_and_names_are_case_insensitive() {
    let source = "* banner comment\nINT Count = 1\nWrite COUNT\n";
    assert_eq!(texts(&draw(source)), ["1"]);
}

#[test]
fn test_comment_and_blank_lines_are_skipped() {
    let source = "\n* setup\n\nint x = 2\n* emit\nwrite x\n";
    assert_eq!(texts(&draw(source)), ["2"]);
}

#[test]
fn test_semicolons_separate_statements() {
    let source = "int x = 1; write x; write x + 1\n";
    assert_eq!(texts(&draw(source)), ["1", "2"]);
}

#[test]
fn test_call_arity_mismatch_rejected() {
    let errors = compile_errors("method f int n\nend method\ncall f 1 2\n");
    assert_eq!(errors[0].code(), ErrorCode::IllegalCall);
}

#[test]
fn test_call_to_unknown_method_rejected() {
    let errors = compile_errors("call nope\n");
    assert_eq!(errors[0].code(), ErrorCode::UndefinedMethod);
}
