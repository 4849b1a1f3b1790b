use std::io::Cursor;

use quill::{interpreter::evaluator::core::Interpreter, parse_source};

/// Runs a script with the given stdin bytes and returns its stdout.
fn run_with_input(source: &str, input: &str) -> Result<String, String> {
    let statements = parse_source(source).map_err(|e| e.to_string())?;

    let mut output = Vec::new();
    let result = Interpreter::with_io(Cursor::new(input), &mut output).interpret(&statements);

    let text = String::from_utf8(output).expect("script output is valid UTF-8");
    match result {
        Ok(()) => Ok(text),
        Err(e) => Err(e.to_string()),
    }
}

fn run(source: &str) -> Result<String, String> {
    run_with_input(source, "")
}

fn assert_output(source: &str, expected: &str) {
    match run(source) {
        Ok(out) => assert_eq!(out, expected, "script: {source}"),
        Err(e) => panic!("Script failed: {e}\n{source}"),
    }
}

fn assert_failure(source: &str, needle: &str) {
    match run(source) {
        Ok(_) => panic!("Script succeeded but was expected to fail:\n{source}"),
        Err(e) => {
            assert!(e.contains(needle),
                    "error `{e}` does not mention `{needle}`")
        },
    }
}

#[test]
fn arithmetic_and_declarations() {
    assert_output("let x = 2; let y = 3; write(x + y);", "5\n");
    assert_output("write(8 - 5); write(7 * 9);", "3\n63\n");
    assert_output("write(7 % 3);", "1\n");
    assert_output("let z; write(z);", "0\n");
}

#[test]
fn integer_division_truncates() {
    assert_output("write(6 / 4);", "1\n");
    assert_output("write(10 / 2);", "5\n");
    assert_output("write(7.0 / 2);", "3.5\n");
}

#[test]
fn reals_keep_their_decimal_point() {
    assert_output("write(3.0);", "3.0\n");
    assert_output("write(1 + 2.5);", "3.5\n");
    assert_output("write(2 * 3.0);", "6.0\n");
    assert_output("write(7.5 % 2);", "1.5\n");
}

#[test]
fn string_concatenation() {
    assert_output("let s = \"hi\"; write(s + \" \" + s);", "hi hi\n");
    assert_output("write(\"n = \" + 42);", "n = 42\n");
    assert_output("write(1.5 + \"!\");", "1.5!\n");
}

#[test]
fn string_escapes() {
    assert_output(r#"write("a\tb");"#, "a\tb\n");
    assert_output(r#"write("say \"hi\"");"#, "say \"hi\"\n");
    assert_output("write('single');", "single\n");
}

#[test]
fn comparisons_and_equality() {
    assert_output("write(2 < 3); write(3 >= 3); write(2 != 3);", "true\ntrue\ntrue\n");
    assert_output("write(\"a\" < \"b\");", "true\n");
    assert_output("write(\"a\" == \"a\");", "true\n");
    // Equality never coerces between types.
    assert_output("write(2 == 2.0);", "false\n");
    assert_output("write([1, 2] == [1, 2]); write([1] == [1, 3]);", "true\nfalse\n");
}

#[test]
fn logical_operators_require_booleans() {
    assert_output("write(true && false); write(true || false); write(!false);",
                  "false\ntrue\ntrue\n");
    assert_failure("write(1 && true);", "Expected boolean");
}

#[test]
fn bitwise_and_shifts_use_the_32_bit_view() {
    assert_output("write(6 & 3); write(6 | 3); write(6 ^^ 3);", "2\n7\n5\n");
    assert_output("write(1 << 4); write(-8 >> 1);", "16\n-4\n");
    assert_output("write(~0);", "-1\n");
    // Logical right shift zero-fills.
    assert_output("write(-1 >>> 28);", "15\n");
}

#[test]
fn exponents_and_roots() {
    assert_output("write(2 ^ 10);", "1024\n");
    // A negative exponent promotes to real.
    assert_output("write(2 ^ -1);", "0.5\n");
    // Right-associative: 2 ^ (3 ^ 2).
    assert_output("write(2 ^ 3 ^ 2);", "512\n");
    assert_output("let r = 9 ^/ 2; write(r > 2.999 && r < 3.001);", "true\n");
    assert_failure("write(4 ^/ 0);", "Root with exponent 0");
}

#[test]
fn division_by_zero_fails_with_line() {
    assert_failure("let x = 1 / 0;", "line 1");
    assert_failure("let x = 1 / 0;", "Division by zero");
    assert_failure("let x = 5 % 0;", "Division by zero");
}

#[test]
fn integer_overflow_is_detected() {
    assert_failure("write(9223372036854775807 + 1);", "overflow");
}

#[test]
fn precedence_follows_c_conventions() {
    assert_output("write(2 + 3 * 4);", "14\n");
    assert_output("write((2 + 3) * 4);", "20\n");
    assert_output("write(1 + 2 < 4 && true);", "true\n");
    assert_output("write((6 & 3) == 2);", "true\n");
}

#[test]
fn ternary_and_elvis() {
    assert_output("write(true ? 1 : 2); write(false ? 1 : 2);", "1\n2\n");
    assert_output("write(false ?: 9); write(true ?: 9);", "9\ntrue\n");
    assert_output("let grade = 85; write(grade > 89 ? \"A\" : grade > 79 ? \"B\" : \"C\");",
                  "B\n");
    assert_failure("write(1 ? 2 : 3);", "Expected boolean");
}

#[test]
fn nullish_fallback_and_assignment() {
    assert_output("function g() { return; } let v = g(); write(v ?? 5); write(v);",
                  "5\nnull\n");
    assert_output("function g() { return; } let v = g(); v ??= 3; write(v);", "3\n");
    assert_output("let w = 1; w ??= 9; write(w);", "1\n");
}

#[test]
fn membership_tests() {
    assert_output("let a = [1, 2, 3]; write(2 in a); write(5 in a); write(5 not in a);",
                  "true\nfalse\ntrue\n");
    assert_failure("write(1 in 2);", "Expected array");
}

#[test]
fn arrays_and_indexing() {
    assert_output("let a = [1, 2, 3]; for (let i = 0; i < 3; i = i + 1) { write(a[i]); }",
                  "1\n2\n3\n");
    assert_output("let m = [[1, 2], [3, 4]]; write(m[1][0]);", "3\n");
    assert_output("write([1, \"two\", true]);", "[1, \"two\", true]\n");
    assert_output("write([]);", "[]\n");
}

#[test]
fn index_errors() {
    assert_failure("let a = [1]; write(a[1]);", "out of bounds");
    assert_failure("let a = [1]; write(a[-1]);", "out of bounds");
    assert_failure("write(1[0]);", "index a non-array");
    assert_failure("let a = [1]; write(a[0.5]);", "index must be an integer");
}

#[test]
fn compound_assignments_are_expressions() {
    assert_output("let x = 2; x += 3; write(x);", "5\n");
    assert_output("let x = 7; x -= 2; write(x);", "5\n");
    assert_output("let x = 4; x *= 2; write(x);", "8\n");
    assert_output("let x = 9; x /= 3; write(x);", "3\n");
    assert_output("let x = 9; x %= 4; write(x);", "1\n");
    assert_output("let p = 2; p ^= 3; write(p);", "8\n");
    // The stored value is the expression's value.
    assert_output("let y = 10; write(y *= 2);", "20\n");
    assert_output("let a = 0; let b = a = 5; write(a); write(b);", "5\n5\n");
}

#[test]
fn postfix_increment_and_decrement() {
    assert_output("let i = 5; write(i++); write(i);", "6\n6\n");
    assert_output("let i = 5; i--; write(i);", "4\n");
    assert_output("let r = 1.5; r++; write(r);", "2.5\n");
    assert_failure("5++;", "must be a variable");
}

#[test]
fn if_else_branches() {
    assert_output("let x = 10; if (x > 0) { write(\"pos\"); } else { write(\"neg\"); }",
                  "pos\n");
    assert_output("let x = -1; if (x > 0) { write(\"pos\"); } else { write(\"neg\"); }",
                  "neg\n");
    assert_output("let x = 0; if (x > 0) { write(1); } else if (x == 0) { write(2); } else { write(3); }",
                  "2\n");
    // Single-statement bodies need no braces.
    assert_output("if (true) write(\"yes\"); else write(\"no\");", "yes\n");
    assert_failure("if (1) { write(1); }", "Expected boolean");
}

#[test]
fn while_loops() {
    assert_output("let i = 3; while (i > 0) { write(i); i = i - 1; }", "3\n2\n1\n");
    // A non-boolean condition ends the loop instead of failing.
    assert_output("let i = 0; while (i) { write(i); } write(\"done\");", "done\n");
}

#[test]
fn for_each_loops() {
    assert_output("for (x in [1, 2, 3]) { write(x); }", "1\n2\n3\n");
    assert_output("let total = 0; for (n in [1, 2, 3, 4]) { total += n; } write(total);",
                  "10\n");
    assert_failure("for (x in 5) { write(x); }", "Expected array");
    // The loop variable does not leak out of the loop.
    assert_failure("for (x in [1]) { } write(x);", "Unknown variable");
}

#[test]
fn block_scope_unwinds_declarations() {
    assert_output("let x = 1; { let x = 2; } write(x);", "1\n");
    assert_output("let x = 1; { x = 5; } write(x);", "5\n");
    assert_output("let x = 1; { let x = 2; write(x); } write(x);", "2\n1\n");
}

#[test]
fn duplicate_declaration_in_same_scope_fails() {
    assert_failure("let x = 1; let x = 2;", "already declared");
}

#[test]
fn const_bindings_are_immutable() {
    assert_failure("const k = 7; k = 8;", "line 1");
    assert_failure("const k = 7; k = 8;", "constant");
    assert_failure("const k = 7; k += 1;", "constant");
    assert_failure("const k = 7; k++;", "constant");
    assert_failure("const k;", "must be initialized");
}

#[test]
fn functions_and_recursion() {
    assert_output("function f(n){ if (n == 0) { return 1; } return n * f(n - 1); } write(f(5));",
                  "120\n");
    assert_output("function add(a, b) { return a + b; } write(add(2, 5));", "7\n");
    assert_output("function noop() { } write(noop());", "null\n");
}

#[test]
fn closures_see_bindings_at_call_time() {
    assert_output("let base = 10;\nfunction add(n) { return base + n; }\nbase = 100;\nwrite(add(1));",
                  "101\n");
    assert_output("let counter = 0;\nfunction bump() { counter = counter + 1; return counter; }\nbump();\nbump();\nwrite(counter);",
                  "2\n");
}

#[test]
fn nested_functions_capture_their_scope() {
    assert_output("function outer() {\n    let hidden = 7;\n    function inner() { return hidden; }\n    return inner();\n}\nwrite(outer());",
                  "7\n");
}

#[test]
fn parameters_shadow_without_touching_the_caller() {
    assert_output("let n = 1; function f(n) { n = 99; return n; } write(f(5)); write(n);",
                  "99\n1\n");
}

#[test]
fn return_crosses_blocks_and_loops() {
    assert_output("function find(limit) {\n    for (let i = 0; i < limit; i = i + 1) {\n        if (i == 3) { return i; }\n    }\n    return -1;\n}\nwrite(find(10));",
                  "3\n");
    assert_output("function f() { while (true) { return \"out\"; } } write(f());",
                  "out\n");
}

#[test]
fn return_without_a_function_fails() {
    assert_failure("return 1;", "outside of a function");
    assert_failure("{ return; }", "outside of a function");
}

#[test]
fn call_errors() {
    assert_failure("function f(a, b) { return a; } f(1);", "expects 2 arguments");
    assert_failure("g();", "Unknown function");
    assert_failure("write(missing);", "Unknown variable");
}

#[test]
fn builtin_names_are_reserved_words() {
    assert_failure("function read() { return 1; }", "identifier");
    assert_failure("let write = 1;", "identifier");
}

#[test]
fn builtins_resolve_through_the_call_table() {
    use quill::{ast::Expr, interpreter::value::Value};

    let call = Expr::Call { name:      "write".to_string(),
                            arguments: vec![Expr::Literal { value: 7.into(),
                                                            line:  1, }],
                            line:      1, };

    let mut output = Vec::new();
    let mut interp = Interpreter::with_io(Cursor::new(""), &mut output);

    assert_eq!(interp.eval(&call).unwrap(), Value::Null);
    assert_eq!(output, b"7\n");
}

#[test]
fn read_statement_binds_parsed_input() {
    assert_eq!(run_with_input("read(\"Enter: \") x; write(x + 1);", "41\n").unwrap(),
               "Enter: 42\n");
    assert_eq!(run_with_input("read() a; read() b; write(a); write(b);", "3.5\nhello\n").unwrap(),
               "3.5\nhello\n");
}

#[test]
fn read_expression_yields_the_parsed_value() {
    assert_eq!(run_with_input("let x = read() + 1; write(x);", "5\n").unwrap(),
               "6\n");
    assert_eq!(run_with_input("write(read(\"p: \"));", "7\n").unwrap(), "p: 7\n");
}

#[test]
fn read_without_newline_still_reads_the_line() {
    assert_eq!(run_with_input("read() x; write(x);", "12").unwrap(), "12\n");
}

#[test]
fn write_formats_scalars() {
    assert_output("write(\"hello\");", "hello\n");
    assert_output("write(true); write(false);", "true\nfalse\n");
}

#[test]
fn parse_errors_carry_the_offending_line() {
    assert_failure("let x = 1;\n]", "line 2");
    assert_failure("let = 1;", "identifier");
    assert_failure("write(1)", "';'");
    assert_failure("let s = \"abc", "Unterminated");
}

#[test]
fn reserved_keywords_cannot_start_expressions() {
    assert_failure("class Foo { }", "Unexpected token");
    assert_failure("let class = 1;", "identifier");
}

#[test]
fn unicode_identifiers() {
    assert_output("let größe = 5; write(größe);", "5\n");
}

#[test]
fn return_tolerates_a_missing_semicolon_at_block_end() {
    assert_output("function f() { return 3 } write(f());", "3\n");
}

#[test]
fn deterministic_output_for_fixed_input() {
    let source = "read() n; write(n * 2); write(\"bye\");";
    let first = run_with_input(source, "21\n").unwrap();
    let second = run_with_input(source, "21\n").unwrap();
    assert_eq!(first, second);
    assert_eq!(first, "42\nbye\n");
}

mod includes {
    use super::{assert_failure, run};

    #[test]
    fn include_runs_in_the_current_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.ql");
        std::fs::write(&path,
                       "function double(n) { return n * 2; }\nlet shared = 10;\n").unwrap();

        let source = format!("include from \"{}\";\nwrite(double(shared));",
                             path.display());
        assert_eq!(run(&source).unwrap(), "20\n");
    }

    #[test]
    fn include_accepts_a_dotted_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("helpers.ql");
        std::fs::write(&path, "let answer = 42;\n").unwrap();

        let source = format!("include helpers.answer from \"{}\";\nwrite(answer);",
                             path.display());
        assert_eq!(run(&source).unwrap(), "42\n");
    }

    #[test]
    fn missing_file_fails_at_the_include_line() {
        assert_failure("include from \"no_such_file.ql\";", "Could not include");
        assert_failure("write(1);\ninclude from \"no_such_file.ql\";", "line 2");
    }

    #[test]
    fn parse_errors_in_included_files_are_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ql");
        std::fs::write(&path, "let = ;").unwrap();

        let source = format!("include from \"{}\";", path.display());
        assert_failure(&source, "Could not include");
    }
}
