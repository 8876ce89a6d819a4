use search_cli::run_console;
use std::io::Cursor;

#[test]
fn console_prints_ranked_documents() {
    let input = "\
и в на
3
белый кот и модный ошейник
2 8 -3
пушистый кот пушистый хвост
4 7 2 0 1
ухоженный пёс выразительные глаза
1 9
пушистый ухоженный кот
";
    let mut out = Vec::new();
    let found = run_console(Cursor::new(input), &mut out).unwrap();
    assert_eq!(found.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2, 0]);
    assert_eq!(found.iter().map(|d| d.rating).collect::<Vec<_>>(), vec![2, 9, 2]);

    let printed = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(
        lines,
        vec![
            "{ document_id = 1, relevance = 0.650672, rating = 2 }",
            "{ document_id = 2, relevance = 0.274653, rating = 9 }",
            "{ document_id = 0, relevance = 0.101366, rating = 2 }",
        ]
    );
}

#[test]
fn console_accepts_crlf_and_empty_query() {
    let input = "the\r\n1\r\ncat in the city\r\n1 5\r\n\r\n";
    let mut out = Vec::new();
    let found = run_console(Cursor::new(input), &mut out).unwrap();
    assert!(found.is_empty());
    assert!(out.is_empty());
}

#[test]
fn console_rejects_truncated_input() {
    let input = "\n2\nwhite cat\n1 3\n";
    let err = run_console(Cursor::new(input), Vec::new()).unwrap_err();
    assert!(err.to_string().contains("expected document text"));
}
