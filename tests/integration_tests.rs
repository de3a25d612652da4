// Parser robustness suites
//
// Table-driven lexer + parser cases grouped into suites. Each case states
// whether the front end should accept the input and, for failures, a
// fragment the error message must contain.

use quill::error::QuillError;
use quill::lexer::Lexer;
use quill::parser::Parser;

/// One front-end input and what should happen to it
struct TestCase {
    name: String,
    input: String,
    should_succeed: bool,
    expected_error_contains: Option<String>,
}

impl TestCase {
    fn should_succeed(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: true,
            expected_error_contains: None,
        }
    }

    fn should_fail_with_message(name: &str, input: &str, expected_msg: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: Some(expected_msg.to_string()),
        }
    }

    /// `None` on pass, otherwise why the case failed. Panics count as failures.
    fn check(&self) -> Option<String> {
        let outcome = match std::panic::catch_unwind(|| parse_input(&self.input)) {
            Ok(outcome) => outcome,
            Err(panic) => {
                let message = panic
                    .downcast_ref::<String>()
                    .map(String::as_str)
                    .or_else(|| panic.downcast_ref::<&str>().copied())
                    .unwrap_or("unknown panic");
                return Some(format!("CRASHED - {}", message));
            }
        };

        match (outcome, self.should_succeed) {
            (Ok(_), true) => None,
            (Ok(_), false) => Some("expected parsing to fail, but it succeeded".to_string()),
            (Err(error), true) => Some(format!("expected parsing to succeed, got: {}", error.message)),
            (Err(error), false) => match &self.expected_error_contains {
                Some(expected) if !error.message.contains(expected) => Some(format!(
                    "error '{}' doesn't contain '{}'",
                    error.message, expected
                )),
                _ => None,
            },
        }
    }
}

struct TestSuite {
    name: String,
    tests: Vec<TestCase>,
}

impl TestSuite {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tests: Vec::new(),
        }
    }

    fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    /// Runs every case, printing a line each, and returns the failures.
    fn run(&self) -> Vec<String> {
        println!("Running test suite: {}", self.name);
        let mut failures = Vec::new();

        for test in &self.tests {
            match test.check() {
                None => println!("  ✓ {}", test.name),
                Some(reason) => {
                    println!("  ✗ {}: {}", test.name, reason);
                    failures.push(format!("{} / {}: {}", self.name, test.name, reason));
                }
            }
        }

        println!("{} of {} passed\n", self.tests.len() - failures.len(), self.tests.len());
        failures
    }
}

fn parse_input(input: &str) -> Result<quill::ast::Program, QuillError> {
    let tokens = Lexer::new(input).tokenize()?;
    Parser::new(tokens).parse()
}

// ============================================================================
// Test Suite Creation Functions
// ============================================================================

fn create_statement_tests() -> TestSuite {
    let mut suite = TestSuite::new("Statement Tests");

    suite.add_test(TestCase::should_succeed("var_declaration", "var x = 1;"));
    suite.add_test(TestCase::should_succeed("plain_assignment", "x = 1;"));
    suite.add_test(TestCase::should_succeed("print_statement", "print x;"));
    suite.add_test(TestCase::should_succeed(
        "several_statements",
        "var x = 1; x = x + 1; print x;",
    ));
    suite.add_test(TestCase::should_succeed("statements_across_lines", "var a = 1;\nprint a;\n"));

    suite.add_test(TestCase::should_fail_with_message(
        "bare_expression",
        "1 + 2;",
        "Unknown statement",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "identifier_without_equal",
        "x + 1;",
        "Unknown statement",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "stray_semicolon",
        ";",
        "Unknown statement, found Semicolon ';'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "keyword_as_statement",
        "true;",
        "Unknown statement",
    ));

    suite
}

fn create_missing_token_tests() -> TestSuite {
    let mut suite = TestSuite::new("Missing Token Tests");

    suite.add_test(TestCase::should_fail_with_message(
        "var_without_name",
        "var = 1;",
        "Expected variable name after 'var', found Equal '='",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "var_with_keyword_name",
        "var print = 1;",
        "Expected variable name after 'var'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "var_without_equal",
        "var x 1;",
        "Expected '=' after variable name, found Number '1'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "declaration_without_semicolon",
        "var x = 1",
        "Expected ';' after variable declaration, found end of input",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "assignment_without_semicolon",
        "x = 1 y = 2;",
        "Expected ';' after assignment, found Identifier 'y'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "print_without_semicolon",
        "print 1",
        "Expected ';' after print value",
    ));

    suite
}

fn create_expression_tests() -> TestSuite {
    let mut suite = TestSuite::new("Expression Tests");

    suite.add_test(TestCase::should_succeed("mixed_precedence", "print 1 + 2 * 3 - 4 / 5;"));
    suite.add_test(TestCase::should_succeed("string_concatenation", "print \"a\" + \"b\";"));
    suite.add_test(TestCase::should_succeed("variables_in_expression", "print a * b + c;"));
    let long_chain = format!("print 1{};", " + 1".repeat(500));
    suite.add_test(TestCase::should_succeed("long_operator_chain", &long_chain));

    suite.add_test(TestCase::should_fail_with_message(
        "missing_right_operand",
        "print 1 +;",
        "Expected number, string, or identifier, found Semicolon",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_left_operand",
        "print * 2;",
        "Expected number, string, or identifier",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "double_operator",
        "print 1 ++ 2;",
        "Expected number, string, or identifier, found Plus '+'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "unary_minus_unsupported",
        "var x = -1;",
        "Expected number, string, or identifier",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "boolean_literal_unsupported",
        "var x = false;",
        "found False 'false'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "empty_print",
        "print;",
        "Expected number, string, or identifier",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "eof_after_operator",
        "print 1 *",
        "found end of input",
    ));

    suite
}

fn create_lexical_tests() -> TestSuite {
    let mut suite = TestSuite::new("Lexical Tests");

    suite.add_test(TestCase::should_succeed("empty_input", ""));
    suite.add_test(TestCase::should_succeed("only_whitespace", "   \n\t  \r\n"));
    suite.add_test(TestCase::should_succeed("unicode_identifier", "var café = 1;"));
    suite.add_test(TestCase::should_succeed("underscore_identifier", "var _tmp_1 = 1;"));
    // The literal runs to the end of input and swallows the semicolon
    suite.add_test(TestCase::should_fail_with_message(
        "unterminated_string",
        "print \"hello;",
        "Expected ';' after print value, found end of input",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "hash_symbol",
        "var x = 1 # 2;",
        "Unexpected character '#' at position 10",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "parenthesis_unsupported",
        "print (1);",
        "Unexpected character '('",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "decimal_point_unsupported",
        "var x = 1.5;",
        "Unexpected character '.'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "comment_unsupported",
        "// note\nprint 1;",
        "Unknown statement, found Divide '/'",
    ));

    suite
}

// ============================================================================
// Main Test Function
// ============================================================================

#[test]
fn comprehensive_parser_tests() {
    let failures: Vec<String> = [
        create_statement_tests(),
        create_missing_token_tests(),
        create_expression_tests(),
        create_lexical_tests(),
    ]
    .iter()
    .flat_map(TestSuite::run)
    .collect();

    assert!(failures.is_empty(), "failed parser cases:\n{}", failures.join("\n"));
}
