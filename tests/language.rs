use std::fs::{self};

use lyric::{
    ast::{BinaryOperator, NodeKind},
    error::{Error, ParseError, RuntimeError},
    get_output,
    interpreter::{
        evaluator::core::Config,
        lexer::{
            core::Lexer,
            lex,
            lexeme::LexemeKind,
            position::{Position, Range},
        },
        parser::core::parse,
        session::Interpreter,
        value::host::HostValue,
    },
};
use walkdir::WalkDir;

#[test]
fn program_files_match_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "lyr"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                              panic!("Failed to read {expected_path:?}: {e}")
                                                          });

        count += 1;
        match get_output(&source, &[]) {
            Ok(lines) => {
                let expected = expected.lines().collect::<Vec<_>>();
                assert_eq!(lines, expected, "Output of {path:?} differs");
            },
            Err(e) => panic!("Program {path:?} failed:\n{source}\nError: {e}"),
        }
    }

    assert!(count > 0, "No programs found in tests/programs");
}

fn output(src: &str) -> Vec<String> {
    get_output(src, &[]).unwrap_or_else(|e| panic!("Script failed: {e}"))
}

fn assert_output(src: &str, expected: &[&str]) {
    assert_eq!(output(src), expected, "Unexpected output for:\n{src}");
}

fn assert_success(src: &str) {
    if let Err(e) = get_output(src, &[]) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_output(src, &[]).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

#[test]
fn poetic_number_literals() {
    assert_output("Tommy was a lean mean wrecking machine\nsay Tommy", &["14487"]);
    assert_output("Tommy is the rocker made fire\nsay Tommy", &["3644"]);
    assert_output("My heart is ice. cold fire\nsay my heart", &["3.44"]);
}

#[test]
fn poetic_constants_and_strings() {
    assert_output("Tommy is nothing\nsay Tommy", &["null"]);
    assert_output("Tommy is right\nsay Tommy", &["true"]);
    assert_output("Tommy says hello world\nsay Tommy", &["hello world"]);
    assert_output("Tommy says  two spaces\nsay Tommy", &[" two spaces"]);
}

#[test]
fn arithmetic_precedence() {
    assert_output("say 1 plus 2 times 3", &["7"]);
    assert_output("say 10 minus 4 over 2", &["8"]);
    assert_output("put 1.5 into x\nsay x times 2", &["3"]);
    assert_output("say \"rock\" with \"star\"", &["rockstar"]);
}

#[test]
fn boolean_binds_looser_than_comparison() {
    assert_output("put 1 into x\nput 2 into y\nsay x is 1 and y is 2", &["true"]);

    let nodes = parse("say x is 1 and y is 2").unwrap();
    let NodeKind::Output(value) = &nodes[0].kind else {
        panic!("expected an output statement, got {:?}", nodes[0].kind);
    };
    let NodeKind::Binary { op, left, right } = &value.kind else {
        panic!("expected a binary operation, got {:?}", value.kind);
    };
    assert_eq!(*op, BinaryOperator::And);
    assert!(matches!(left.kind, NodeKind::Binary { op: BinaryOperator::Equal, .. }));
    assert!(matches!(right.kind, NodeKind::Binary { op: BinaryOperator::Equal, .. }));
}

#[test]
fn comparisons_and_logic() {
    assert_output("say 3 is higher than 2", &["true"]);
    assert_output("say 2 is as low as 2", &["true"]);
    assert_output("say 2 ain't 3", &["true"]);
    assert_output("say \"abc\" is lower than \"abd\"", &["true"]);
    assert_output("say 1 is \"1\"", &["false"]);
    assert_output("say true and lies", &["false"]);
    assert_output("say lies nor lies", &["true"]);
    assert_output("say not lies", &["true"]);
}

#[test]
fn pronouns_follow_the_last_assignment() {
    assert_output("put 2 into my heart\nput it plus 3 into it\nsay it", &["5"]);
    assert_failure("say it");
}

#[test]
fn increments_and_decrements() {
    assert_output("put 5 into x\nbuild x up, up\nsay x", &["7"]);
    assert_output("put 5 into x\nknock x down\nsay x", &["4"]);
}

#[test]
fn arrays_push_and_pop() {
    assert_output("rock my list with 4\nrock my list with 6\nsay my list at 0\nsay my list at 1\nsay my list",
                  &["4", "6", "2"]);
    assert_output("rock my list with 4, 6\nroll my list into my hand\nsay my hand\nsay my list",
                  &["6", "1"]);
    assert_output("rock my list\nroll my list into my hand\nsay my hand", &["mysterious"]);
}

#[test]
fn indexed_writes_create_arrays() {
    assert_output("put 5 into my list at 2\nsay my list at 2\nsay my list", &["5", "1"]);
    assert_output("put \"abc\" into x\nsay x at 1", &["b"]);
}

#[test]
fn while_loop_counts() {
    assert_output("put 1 into x\nwhile x is as low as 3\nsay x\nbuild x up\n\nsay \"done\"",
                  &["1", "2", "3", "done"]);
}

#[test]
fn break_leaves_the_loop() {
    assert_output("put 0 into x\nwhile true\nbuild x up\nif x is 3\nbreak\n\n\nsay x", &["3"]);
}

#[test]
fn comment_lines_do_not_close_blocks() {
    assert_output("put 0 into x\nwhile x is lower than 2\n(counting up)\nbuild x up\n\nsay x", &["2"]);
}

#[test]
fn if_else() {
    assert_output("put 3 into x\nif x is greater than 5\nsay \"big\"\notherwise\nsay \"small\"\n\nsay \"end\"",
                  &["small", "end"]);
}

#[test]
fn function_calls() {
    assert_output("Midnight takes your heart and your soul\ngive back your heart plus your soul\n\nsay Midnight taking 2, 3",
                  &["5"]);
    assert_output("Quiet Night takes the noise\nput the noise into the void\n\nsay Quiet Night taking 1",
                  &["null"]);
}

#[test]
fn functions_share_their_defining_scope() {
    assert_output("put 0 into the counter\nIncrement takes the step\nput the counter plus the step into the counter\ngive back the counter\n\nIncrement taking 2\nIncrement taking 3\nsay the counter",
                  &["5"]);
}

#[test]
fn recursion() {
    assert_output("Countdown takes the clock\nif the clock is 0\ngive back 0\n\nsay the clock\nput the clock minus 1 into the time\nCountdown taking the time\n\nCountdown taking 3",
                  &["3", "2", "1"]);
}

#[test]
fn wrong_function_arity_is_error() {
    let source = "Midnight takes your heart and your soul\ngive back your heart\n\n";

    let err = get_output(&format!("{source}say Midnight taking 1"), &[]).unwrap_err();
    assert!(matches!(err,
                     Error::Runtime(RuntimeError::ArgumentCount { expected: 2, found: 1, .. })));

    let err = get_output(&format!("{source}say Midnight taking 1, 2, 3"), &[]).unwrap_err();
    assert!(matches!(err,
                     Error::Runtime(RuntimeError::ArgumentCount { expected: 2, found: 3, .. })));
}

#[test]
fn string_mutations() {
    assert_output("split \"a,b,c\" into my parts with \",\"\nsay my parts at 2\njoin my parts into my line with \"-\"\nsay my line",
                  &["c", "a-b-c"]);
    assert_output("split \"abc\" into my parts\nsay my parts", &["3"]);
    assert_output("cast \"42\" into my number\nsay my number plus 1", &["43"]);
    assert_output("cast \"ff\" into my number with 16\nsay my number", &["255"]);
    assert_output("cast 65 into my letter\nsay my letter", &["A"]);
}

#[test]
fn rounding() {
    assert_output("put 2.5 into x\nturn round x\nsay x", &["3"]);
    assert_output("put -2.5 into x\nturn round x\nsay x", &["-3"]);
    assert_output("put 2.7 into x\nturn x down\nsay x", &["2"]);
    assert_output("put 2.1 into x\nturn x up\nsay x", &["3"]);
}

#[test]
fn input_reads_strings_then_null() {
    assert_eq!(get_output("listen to my heart\nsay my heart", &["hello"]).unwrap(), vec!["hello"]);
    assert_eq!(get_output("listen to my heart\nsay my heart", &[]).unwrap(), vec!["null"]);
}

#[test]
fn runtime_failures() {
    assert_failure("break");
    assert_failure("Escape takes x\nbreak\n\nEscape taking 1");
    assert_failure("say my dreams");
    assert_failure("say \"rock\" times 2");
    assert_failure("put 1 into x\nsay x taking 1");
}

#[test]
fn parse_failures() {
    let err = get_output("put 1 into", &[]).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert!(parse("put 1 into").is_err());
    assert!(matches!(parse("if x is 1\nelse\nelse\n"), Err(ParseError::UnexpectedExpressionKind { .. })));
}

#[test]
fn loop_ceiling_stops_runaway_loops() {
    let mut interpreter =
        Interpreter::new("put 0 into x\nwhile true\nbuild x up\n").with_config(Config::new().with_max_loop_iterations(5));

    let err = interpreter.run().unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::LoopCeiling { limit: 5, .. })));
    assert_eq!(interpreter.global("x"), Some(HostValue::Integer(5)));
}

#[test]
fn globals_persist_until_reset() {
    let mut interpreter = Interpreter::new("rock my list with 1");

    interpreter.run().unwrap();
    interpreter.run().unwrap();
    match interpreter.global("My List") {
        Some(HostValue::Array(entries)) => {
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0], (Some(HostValue::Integer(0)), Some(HostValue::Integer(1))));
        },
        other => panic!("expected an array, got {other:?}"),
    }

    interpreter.reset();
    assert_eq!(interpreter.global("my list"), None);
    interpreter.run().unwrap();
    assert!(matches!(interpreter.global("my list"), Some(HostValue::Array(entries)) if entries.len() == 1));
}

#[test]
fn parsing_is_deterministic() {
    let source = "Midnight takes your heart\nwhile your heart is higher than 1\nknock your heart down\n\ngive back your heart\n\nsay Midnight taking 5";
    assert_eq!(parse(source).unwrap(), parse(source).unwrap());
    assert_success(source);
}

#[test]
fn lexeme_ranges_are_contiguous() {
    let source = "Tommy's   here (a rebel) \"quoted\" 3.5, & nothing\nsay it";
    let lexemes = Lexer::new(source).collect::<Vec<_>>();

    assert!(matches!(lexemes.last().map(|l| l.kind), Some(LexemeKind::Newline { eof: true })));
    for pair in lexemes.windows(2) {
        assert_eq!(pair[0].range.end, pair[1].range.start, "gap between {:?} and {:?}", pair[0], pair[1]);
    }
}

#[test]
fn contractions_fold_into_words() {
    let raw = Lexer::new("A's").collect::<Vec<_>>();
    assert_eq!(raw.len(), 3);
    assert_eq!((raw[0].kind, raw[0].literal.as_str()), (LexemeKind::Identifier, "A"));
    assert_eq!((raw[1].kind, raw[1].literal.as_str()), (LexemeKind::Contraction, "'s"));

    let folded = lex("A's").collect::<Vec<_>>();
    assert_eq!(folded.len(), 2);
    assert_eq!(folded[0].kind, LexemeKind::Identifier);
    assert_eq!(folded[0].literal, "A's");
    assert_eq!(folded[0].pretty.as_deref(), Some("A's"));
    assert_eq!(folded[0].range, raw[0].range.to(raw[1].range));
    assert_eq!(folded[0].range,
               Range::new(Position { line: 1, column: 0 }, Position { line: 1, column: 3 }));

    let lexemes = lex("ain't").collect::<Vec<_>>();
    assert_eq!(lexemes.len(), 2);
    assert_eq!(lexemes[0].literal, "ain't");
}

#[test]
fn dangling_contractions_degrade() {
    let kinds = lex("so 't").map(|l| l.kind).collect::<Vec<_>>();
    assert_eq!(kinds,
               vec![LexemeKind::Identifier,
                    LexemeKind::Whitespace,
                    LexemeKind::Whitespace,
                    LexemeKind::Newline { eof: true }]);

    let lexemes = lex("so 's").collect::<Vec<_>>();
    assert_eq!(lexemes[2].kind, LexemeKind::Identifier);
    assert_eq!(lexemes[2].literal, "'s");
}

#[test]
fn unterminated_strings_and_comments_close_at_end_of_input() {
    assert_output("say \"hello", &["hello"]);
    assert_output("say 1 (never closed", &["1"]);

    let kinds = Lexer::new("(open (nested)").map(|l| l.kind).collect::<Vec<_>>();
    assert_eq!(kinds, vec![LexemeKind::Comment, LexemeKind::Newline { eof: true }]);
}

#[test]
fn string_escapes() {
    assert_output("say \"tab\\there\"", &["tab\there"]);
    assert_output("say \"say \\\"hi\\\"\"", &["say \"hi\""]);
    assert_output("say \"a\\qb\"", &["a\\qb"]);
}

#[test]
fn crlf_line_endings() {
    assert_output("put 1 into x\r\nsay x\r\n", &["1"]);

    let lexemes = Lexer::new("x\r\ny").collect::<Vec<_>>();
    assert_eq!(lexemes[1].kind, LexemeKind::Newline { eof: false });
    assert_eq!(lexemes[1].literal, "\r\n");
    assert_eq!(lexemes[2].range.start, Position { line: 2, column: 0 });
}

#[test]
fn lone_signs_and_dots_are_whitespace() {
    let lexemes = Lexer::new("say . + -\n").collect::<Vec<_>>();
    let kinds = lexemes.iter().map(|l| l.kind).collect::<Vec<_>>();
    assert_eq!(kinds,
               vec![LexemeKind::Identifier,
                    LexemeKind::Whitespace,
                    LexemeKind::Newline { eof: false }]);
    assert_eq!(lexemes[1].literal, " . + -");
}

#[test]
fn unparsable_numbers_are_parse_errors() {
    assert!(matches!(parse("say +."), Err(ParseError::InvalidNumber { .. })));
    assert!(matches!(get_output("say +.", &[]), Err(Error::Parse(ParseError::InvalidNumber { .. }))));
}

#[test]
fn popping_an_empty_array_is_mysterious() {
    assert_output("rock my list with 1\nroll my list\nroll my list into my hand\nsay my hand\nsay my list",
                  &["mysterious", "0"]);
}

#[test]
fn popping_keeps_insertion_order() {
    assert_output("rock my list with 1, 2, 3\nroll my list\nrock my list with 4\njoin my list into my line with \",\"\nsay my line",
                  &["1,2,4"]);
    assert_output("rock my list with 1, 2\nput 9 into my list at \"x\"\nroll my list into my hand\nsay my hand\njoin my list into my line with \",\"\nsay my line",
                  &["2", "1,9"]);
}

#[test]
fn stray_return_is_error() {
    for source in ["return 5", "give back 5"] {
        let err = get_output(source, &[]).unwrap_err();
        assert!(matches!(err,
                         Error::Runtime(RuntimeError::StrayControlFlow { signal: "return", .. })),
                "unexpected result for {source:?}: {err:?}");
    }
}

#[test]
fn arrays_holding_themselves_print() {
    let source = "rock my list with 1\nrock my list with my list\nsay my list";
    assert_output(source, &["2"]);

    let mut interpreter = Interpreter::new(source);
    interpreter.run().unwrap();
    match interpreter.global("my list") {
        Some(HostValue::Array(entries)) => {
            assert_eq!(entries[1], (Some(HostValue::Integer(1)), Some(HostValue::Mysterious)));
        },
        other => panic!("expected an array, got {other:?}"),
    }
}

#[test]
fn pronouns_outlive_the_block_that_assigned() {
    assert_output("put 1 into x\nput 2 into y\nif true\nput 9 into x\n\nsay it", &["9"]);
    assert_output("put 1 into x\nput 2 into y\nwhile x is lower than 3\nbuild x up\n\nput it into z\nsay z",
                  &["3"]);
    assert_output("put 1 into x\nBump takes y\nput y into x\n\nput 7 into z\nBump taking 4\nsay it",
                  &["4"]);
}

#[test]
fn pronouns_forget_variables_of_closed_frames() {
    assert_output("put 1 into x\nif true\nput 5 into the local\n\nsay it", &["1"]);
}

#[test]
fn leading_constants_ignore_the_rest_of_the_line() {
    assert_output("Tommy is nothing but trouble\nsay Tommy", &["null"]);
    assert_output("Tommy is right on time\nsay Tommy", &["true"]);
    assert_output("Tommy was empty inside\nsay Tommy with \"!\"", &["!"]);
}
