mod common;
use common::*;

#[test]
fn test_if_takes_true_branch() {
    let source = "int x = 2\nif x > 1\nwrite \"big\"\nelse\nwrite \"small\"\nend if\n";
    assert_eq!(texts(&draw(source)), ["big"]);
}

#[test]
fn test_if_takes_false_branch() {
    let source = "int x = 0\nif x > 1\nwrite \"big\"\nelse\nwrite \"small\"\nend if\n";
    assert_eq!(texts(&draw(source)), ["small"]);
}

#[test]
fn test_if_without_else_skips_body() {
    let source = "if false\nwrite \"x\"\nend if\nwrite \"y\"\n";
    assert_eq!(texts(&draw(source)), ["y"]);
}

#[test]
fn test_nested_if_lands_after_inner_block() {
    let source = "int x = 5\n\
                  if x > 0\n\
                  if x > 3\n\
                  write \"a\"\n\
                  else\n\
                  write \"b\"\n\
                  end if\n\
                  write \"c\"\n\
                  end if\n";
    assert_eq!(texts(&draw(source)), ["a", "c"]);
}

#[test]
fn test_while_runs_until_condition_fails() {
    let source = "int n\nwhile n < 3\nn = n + 1\nwrite n\nend while\n";
    assert_eq!(texts(&draw(source)), ["1", "2", "3"]);
}

#[test]
fn test_while_false_never_runs() {
    let source = "while false\nwrite \"x\"\nend while\nwrite \"done\"\n";
    assert_eq!(texts(&draw(source)), ["done"]);
}

#[test]
fn test_for_counts_up() {
    assert_eq!(texts(&draw("for i = 1 to 3\nwrite i\nend for\n")), ["1", "2", "3"]);
}

#[test]
fn test_for_counts_down_with_negative_step() {
    let source = "for i = 3 to 1 step -1\nwrite i\nend for\n";
    assert_eq!(texts(&draw(source)), ["3", "2", "1"]);
}

#[test]
fn test_for_empty_range_skips_body() {
    let source = "for i = 3 to 1\nwrite i\nend for\nwrite \"done\"\n";
    assert_eq!(texts(&draw(source)), ["done"]);
}

#[test]
fn test_for_reevaluates_bound_every_pass() {
    let source = "int limit = 2\n\
                  for i = 1 to limit\n\
                  if i == 1\n\
                  limit = 3\n\
                  end if\n\
                  write i\n\
                  end for\n";
    assert_eq!(texts(&draw(source)), ["1", "2", "3"]);
}

#[test]
fn test_for_step_skips_values() {
    let source = "for i = 0 to 10 step 5\nwrite i\nend for\n";
    assert_eq!(texts(&draw(source)), ["0", "5", "10"]);
}

#[test]
fn test_bare_end_closes_innermost_block() {
    let source = "int x = 1\nwhile x < 2\nif x == 1\nwrite \"in\"\nend\nx = x + 1\nend\n";
    assert_eq!(texts(&draw(source)), ["in"]);
}
