//! Parser Tests
//!
//! Tests for reading commands from a token stream and rendering responses.

use std::io::Cursor;

use pagedkv::protocol::{
    decode_commands, encode_command, Command, CommandReader, CommandType, Response,
};
use pagedkv::PagedKvError;

// =============================================================================
// Helper Functions
// =============================================================================

fn read_all(input: &str) -> Vec<pagedkv::Result<Command>> {
    CommandReader::new(Cursor::new(input.to_string())).collect()
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_decode_every_command() {
    let commands = decode_commands("init 16 2\nput 3 100\nget 3\ndelete 3\ndump\n").unwrap();

    assert_eq!(
        commands,
        vec![
            Command::Init {
                page_size: 16,
                number_of_pages: 2
            },
            Command::Put { key: 3, value: 100 },
            Command::Get { key: 3 },
            Command::Delete { key: 3 },
            Command::Dump,
        ]
    );
}

#[test]
fn test_tokens_span_lines() {
    let commands = decode_commands("put\n  -4\n\n\t-9   get -4").unwrap();

    assert_eq!(
        commands,
        vec![Command::Put { key: -4, value: -9 }, Command::Get { key: -4 }]
    );
}

#[test]
fn test_empty_input() {
    assert!(read_all("").is_empty());
    assert!(read_all("  \n\n ").is_empty());
}

#[test]
fn test_unknown_command_then_continue() {
    let results = read_all("frobnicate get 7");

    assert_eq!(results.len(), 2);
    assert!(matches!(&results[0], Err(PagedKvError::InvalidCommand(t)) if t == "frobnicate"));
    assert_eq!(results[1].as_ref().unwrap(), &Command::Get { key: 7 });
}

#[test]
fn test_keywords_are_case_sensitive() {
    let results = read_all("GET 1");

    assert!(matches!(&results[0], Err(PagedKvError::InvalidCommand(_))));
}

#[test]
fn test_invalid_argument_consumes_token() {
    let results = read_all("get abc get 5");

    assert_eq!(results.len(), 2);
    assert!(matches!(
        &results[0],
        Err(PagedKvError::InvalidArgument { command: "get", .. })
    ));
    assert_eq!(results[1].as_ref().unwrap(), &Command::Get { key: 5 });
}

#[test]
fn test_non_utf8_keyword_is_invalid_command() {
    let input = b"put 2 7\n\xff\xfe\nget 2\n".to_vec();
    let results: Vec<_> = CommandReader::new(Cursor::new(input)).collect();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap(), &Command::Put { key: 2, value: 7 });
    assert!(matches!(&results[1], Err(PagedKvError::InvalidCommand(_))));
    assert_eq!(results[2].as_ref().unwrap(), &Command::Get { key: 2 });
}

#[test]
fn test_non_utf8_argument_is_invalid_argument() {
    let input = b"delete \xc3\x28 dump".to_vec();
    let results: Vec<_> = CommandReader::new(Cursor::new(input)).collect();

    assert_eq!(results.len(), 2);
    assert!(matches!(
        &results[0],
        Err(PagedKvError::InvalidArgument { command: "delete", .. })
    ));
    assert_eq!(results[1].as_ref().unwrap(), &Command::Dump);
}

#[test]
fn test_init_rejects_negative_sizes() {
    let results = read_all("init -16 2");

    assert!(matches!(
        &results[0],
        Err(PagedKvError::InvalidArgument { command: "init", .. })
    ));
}

#[test]
fn test_key_out_of_i32_range() {
    let results = read_all("get 2147483648");

    assert!(matches!(
        &results[0],
        Err(PagedKvError::InvalidArgument { .. })
    ));
}

#[test]
fn test_missing_argument_at_end_of_input() {
    let results = read_all("put 5");

    assert_eq!(results.len(), 1);
    assert!(matches!(
        &results[0],
        Err(PagedKvError::MissingArgument { command: "put" })
    ));
}

#[test]
fn test_decode_commands_stops_at_first_error() {
    assert!(decode_commands("get 1 nope").is_err());
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_command_text() {
    assert_eq!(
        encode_command(&Command::Init {
            page_size: 64,
            number_of_pages: 4
        }),
        "init 64 4"
    );
    assert_eq!(encode_command(&Command::Put { key: -3, value: 9 }), "put -3 9");
    assert_eq!(encode_command(&Command::Get { key: 8 }), "get 8");
    assert_eq!(encode_command(&Command::Delete { key: 8 }), "delete 8");
    assert_eq!(encode_command(&Command::Dump), "dump");
}

#[test]
fn test_encoded_script_parses_back() {
    let script = [
        Command::Init {
            page_size: 24,
            number_of_pages: 3,
        },
        Command::Put {
            key: i32::MIN,
            value: i32::MAX,
        },
        Command::Dump,
    ];
    let text: Vec<String> = script.iter().map(encode_command).collect();

    assert_eq!(decode_commands(&text.join("\n")).unwrap(), script.to_vec());
}

#[test]
fn test_command_type_keywords() {
    for command_type in [
        CommandType::Init,
        CommandType::Get,
        CommandType::Put,
        CommandType::Delete,
        CommandType::Dump,
    ] {
        assert_eq!(CommandType::from_keyword(command_type.keyword()), Some(command_type));
    }
    assert_eq!(Command::Dump.command_type().to_string(), "dump");
}

// =============================================================================
// Response Tests
// =============================================================================

#[test]
fn test_render_responses() {
    let mut out = Vec::new();

    Response::Value(-12).render(&mut out).unwrap();
    Response::Empty.render(&mut out).unwrap();
    Response::Dump("00 [..]".to_string()).render(&mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "-12\n00 [..]\n");
}

#[test]
fn test_response_value() {
    assert_eq!(Response::Value(3).value(), Some(3));
    assert_eq!(Response::Empty.value(), None);
}
