use arch::Catalog;
use stasm::{assemble, normalize_line_endings};

fn assert(code: &str, expect: Result<Vec<u8>, &str>) {
    let code = normalize_line_endings(code);
    println!("{code}");

    let catalog = Catalog::builtin().unwrap();
    match (assemble(&code, catalog), expect) {
        (Ok(asm), Ok(bytes)) => assert_eq!(&asm.image()[..bytes.len()], &bytes[..]),
        (Err(diag), Err(message)) => assert_eq!(diag.to_string(), message),
        (Ok(asm), Err(message)) => {
            panic!("expected `{message}`, got {:02X?}", &asm.image()[..16])
        }
        (Err(diag), Ok(_)) => panic!("unexpected error: {diag}"),
    }
}

macro_rules! case {
    ($name:ident, $code:expr, $expect:expr) => {
        #[test]
        fn $name() {
            assert($code, $expect);
        }
    };
}

// END
case!(missing_end, "NOP\nDB 10", Err("Line 2: END is missing"));
case!(empty_source, "", Err("Line 1: END is missing"));
case!(comments_only, "; nothing\n\n; here\n", Err("Line 3: END is missing"));
case!(
    rest_is_ignored,
    "END\nthis ] is [ ignored",
    Ok(vec![0x00])
);
case!(
    end_after_label,
    "done: END ; bye",
    Ok(vec![0x00])
);
case!(
    lowercase_end,
    "end",
    Err("Line 1: Expected mnemonic, got 'end'")
);

// Line start
case!(
    lowercase_mnemonic,
    "mov AL,BL\nEND",
    Err("Line 1: Expected mnemonic, got 'mov'")
);
case!(
    unknown_mnemonic,
    "\n\nFOO\nEND",
    Err("Line 3: Expected mnemonic, got 'FOO'")
);
case!(
    comma_first,
    ", NOP\nEND",
    Err("Line 1: Expected mnemonic, got ','")
);
case!(
    string_first,
    "\"hi\"\nEND",
    Err("Line 1: Expected mnemonic, got '\"hi\"'")
);
case!(
    blank_and_comment_lines,
    "; header\n\n   \nNOP ; x\n\nEND",
    Ok(vec![0xFF, 0x00])
);

// ORG and the write-once rule
case!(
    org,
    "ORG 10\nNOP\nEND",
    Ok(vec![0x00; 0x10].into_iter().chain([0xFF, 0x00]).collect())
);
case!(
    org_backward,
    "ORG 10\nNOP\nORG 00\nHALT\nORG 20\nEND",
    Ok(vec![0x00])
);
case!(
    org_missing,
    "ORG\nEND",
    Err("Line 1: Expected hexadecimal number (range 00..FF)")
);
case!(
    org_too_wide,
    "ORG 100\nEND",
    Err("Line 1: Expected hexadecimal number (range 00..FF), got '100'")
);
case!(
    org_trailing,
    "ORG 10 20\nEND",
    Err("Line 1: Expected a comment, got '20'")
);
case!(
    duplicate_write,
    "ORG 00\nDB 01\nORG 00\nDB 02\nEND",
    Err("Line 4: Duplicate RAM allocation at address 00")
);
case!(
    overlapping_instruction,
    "ORG 10\nMOV AL,BL\nORG 11\nEND",
    Err("Line 4: Duplicate RAM allocation at address 11")
);
case!(
    ram_exceeded_by_operand,
    "ORG FF\nMOV AL,BL\nEND",
    Err("Line 2: RAM space exceeded")
);
case!(
    ram_exceeded_by_end,
    "ORG FF\nNOP\nEND",
    Err("Line 3: RAM space exceeded")
);
case!(
    last_byte,
    "ORG FE\nNOP\nEND",
    Ok(vec![0x00])
);

#[test]
fn line_map() {
    let code = normalize_line_endings("; demo\nstart: MOV AL,01\n\nDB \"ok\"\nJMP start\nEND");
    let asm = assemble(&code, Catalog::builtin().unwrap()).unwrap();
    let lines: Vec<Option<usize>> = asm.lines[..10].to_vec();
    assert_eq!(
        lines,
        vec![
            Some(2),
            Some(2),
            Some(2),
            Some(4),
            Some(4),
            Some(5),
            Some(5),
            Some(6),
            None,
            None
        ]
    );
    let used = asm.memory.used();
    assert_eq!(used.iter().filter(|&&u| u).count(), 8);
}

#[test]
fn used_bitmap_follows_org() {
    let code = normalize_line_endings("ORG 80\nDB 01\nORG 40\nEND");
    let asm = assemble(&code, Catalog::builtin().unwrap()).unwrap();
    let used: Vec<usize> = (0..256).filter(|&a| asm.memory.used()[a]).collect();
    assert_eq!(used, vec![0x40, 0x80]);
}

#[test]
fn assembly_is_deterministic() {
    let code = normalize_line_endings("top: MOV AL,[SP]\nINC AL\nJNZ top\nJPA top\nEND");
    let catalog = Catalog::builtin().unwrap();
    let a = assemble(&code, catalog).unwrap();
    let b = assemble(&code, catalog).unwrap();
    assert_eq!(a.image(), b.image());
    assert_eq!(a.memory.used(), b.memory.used());
    assert_eq!(a.tokens, b.tokens);
    assert_eq!(a.lines, b.lines);
}

#[test]
fn opcode_is_patched_in_place() {
    let code = normalize_line_endings("ORG 30\nMOV [SP],DL\nEND");
    let asm = assemble(&code, Catalog::builtin().unwrap()).unwrap();
    assert_eq!(&asm.image()[0x30..0x34], &[0xD4, 0x04, 0x03, 0x00]);
}
