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

// MNEM
case!(g0_nop, "NOP\nEND", Ok(vec![0xFF, 0x00]));
case!(g0_comment, "HALT ; stop\nEND", Ok(vec![0x00, 0x00]));
case!(
    g0_operand,
    "NOP AL\nEND",
    Err("Line 1: Expected a comment, got 'AL'")
);

// MNEM ADDR
case!(g1_call, "CALL 20\nEND", Ok(vec![0xCA, 0x20, 0x00]));
case!(g1_single_digit, "OUT f\nEND", Ok(vec![0xF1, 0x0F, 0x00]));
case!(
    g1_missing,
    "CALL\nEND",
    Err("Line 1: Expected hexadecimal number (range 00..FF)")
);
case!(
    g1_too_wide,
    "CALL 100\nEND",
    Err("Line 1: Expected hexadecimal number (range 00..FF), got '100'")
);
case!(
    g1_bracket,
    "IN [20]\nEND",
    Err("Line 1: Expected hexadecimal number (range 00..FF), got '['")
);

// MNEM REG
case!(g2_push, "PUSH BL\nEND", Ok(vec![0xE0, 0x01, 0x00]));
case!(
    g2_lowercase,
    "POP al\nEND",
    Err("Line 1: Expected register, got 'al'")
);
case!(
    g2_trailing,
    "NOT AL,BL\nEND",
    Err("Line 1: Expected a comment, got ','")
);

// MNEM OFFSET
case!(g3_forward, "JMP next\nnext: END", Ok(vec![0xC0, 0x02, 0x00]));
case!(g3_missing, "JZ\nEND", Err("Line 1: Expected symbol"));
case!(
    g3_comma,
    "JNZ ,\nEND",
    Err("Line 1: Expected symbol, got ','")
);
case!(
    g3_hex,
    "JMP 1F\nEND",
    Err("Line 1: Label must not be hexadecimal number, found: 1F")
);
case!(
    g3_invalid_char,
    "JMP a+b\nEND",
    Err("Line 1: Invalid character in label or symbol, found '+'")
);
case!(
    g3_colon,
    "JMP there:\nEND",
    Err("Line 1: Invalid character in label or symbol, found ':'")
);

// MNEM REG,CONST / REG,REG / REG,[ADDR]
case!(g4_const, "CMP AL,05\nEND", Ok(vec![0xDB, 0x00, 0x05, 0x00]));
case!(g4_reg, "CMP AL,BL\nEND", Ok(vec![0xDA, 0x00, 0x01, 0x00]));
case!(g4_addr, "CMP DL,[3A]\nEND", Ok(vec![0xDC, 0x03, 0x3A, 0x00]));
case!(
    g4_reg_ind,
    "CMP AL,[BL]\nEND",
    Err("Line 1: Expected hexadecimal number (range 00..FF), got 'BL'")
);
case!(
    g4_no_comma,
    "CMP AL BL\nEND",
    Err("Line 1: Expected comma, got 'BL'")
);
case!(
    g4_no_second,
    "CMP AL,\nEND",
    Err("Line 1: Expected hexadecimal number (range 00..FF), register or '['")
);
case!(
    g4_unclosed,
    "CMP AL,[10 ; x\nEND",
    Err("Line 1: Expected ']', got '; x'")
);

// MOV: six forms
case!(g5_const, "MOV AL,10\nEND", Ok(vec![0xD0, 0x00, 0x10, 0x00]));
case!(g5_load, "MOV BL,[20]\nEND", Ok(vec![0xD1, 0x01, 0x20, 0x00]));
case!(g5_store, "MOV [30],CL\nEND", Ok(vec![0xD2, 0x30, 0x02, 0x00]));
case!(g5_load_ind, "MOV DL,[AL]\nEND", Ok(vec![0xD3, 0x03, 0x00, 0x00]));
case!(g5_store_ind, "MOV [SP],AL\nEND", Ok(vec![0xD4, 0x04, 0x00, 0x00]));
case!(g5_reg, "MOV AL,BL\nEND", Ok(vec![0xD5, 0x00, 0x01, 0x00]));
case!(
    g5_const_first,
    "MOV 10,AL\nEND",
    Err("Line 1: Expected register or '[', got '10'")
);
case!(
    g5_unclosed,
    "MOV [AL\nEND",
    Err("Line 1: Expected ']'")
);
case!(
    g5_store_const,
    "MOV [20],30\nEND",
    Err("Line 1: Expected register, got '30'")
);
case!(
    g5_inner,
    "MOV AL,[,]\nEND",
    Err("Line 1: Expected hexadecimal number (range 00..FF) or register, got ','")
);

// MNEM REG,CONST / REG,REG
case!(g6_reg, "ADD AL,BL\nEND", Ok(vec![0xA0, 0x00, 0x01, 0x00]));
case!(g6_const, "SUB CL,7F\nEND", Ok(vec![0xB1, 0x02, 0x7F, 0x00]));
case!(
    g6_bracket,
    "ADD AL,[10]\nEND",
    Err("Line 1: Expected hexadecimal number (range 00..FF) or register, got '['")
);

// MNEM REG / [REG]
case!(g7_reg, "INC DL\nEND", Ok(vec![0xA4, 0x03, 0x00]));
case!(g7_ind, "INC [CL]\nEND", Ok(vec![0xA8, 0x02, 0x00]));
case!(
    g7_addr,
    "INC [10]\nEND",
    Err("Line 1: Expected register, got '10'")
);

// MNEM ABSOLUTE
case!(g8_backward, "top: NOP\nJPA top\nEND", Ok(vec![0xFF, 0xC7, 0x00, 0x00]));
case!(g8_missing, "JPA\nEND", Err("Line 1: Expected symbol"));

// MNEM REG / [ADDR]
case!(g9_reg, "DEC AL\nEND", Ok(vec![0xA5, 0x00, 0x00]));
case!(g9_addr, "DEC [2F]\nEND", Ok(vec![0xA9, 0x2F, 0x00]));
case!(
    g9_reg_ind,
    "DEC [AL]\nEND",
    Err("Line 1: Expected hexadecimal number (range 00..FF), got 'AL'")
);

// MNEM [ADDR]
case!(g10_addr, "SWAP [40]\nEND", Ok(vec![0xB4, 0x40, 0x00]));
case!(
    g10_bare,
    "SWAP 40\nEND",
    Err("Line 1: Expected '[', got '40'")
);

// MNEM [REG]
case!(g11_reg, "CLINC [BL]\nEND", Ok(vec![0xB5, 0x01, 0x00]));
case!(
    g11_bare,
    "CLINC BL\nEND",
    Err("Line 1: Expected '[', got 'BL'")
);

// MNEM [REG],CONST
case!(g12_const, "CPYD [AL],12\nEND", Ok(vec![0xB7, 0x00, 0x12, 0x00]));
case!(
    g12_reg,
    "CPYD [AL],BL\nEND",
    Err("Line 1: Expected hexadecimal number (range 00..FF), got 'BL'")
);
case!(
    g12_no_comma,
    "CPYD [AL]\nEND",
    Err("Line 1: Expected comma")
);

// MNEM REG,REG
case!(g13_reg, "XCHG AL,DL\nEND", Ok(vec![0xB8, 0x00, 0x03, 0x00]));
case!(
    g13_bracket,
    "XCHG AL,[10]\nEND",
    Err("Line 1: Expected register, got '['")
);

#[test]
fn g8_forward_anywhere() {
    let code = normalize_line_endings("JPA far\nORG F0\nfar: END");
    let asm = assemble(&code, Catalog::builtin().unwrap()).unwrap();
    assert_eq!(&asm.image()[..2], &[0xC7, 0xF0]);
    assert_eq!(asm.image()[0xF0], 0x00);
}

#[test]
fn custom_table() {
    let catalog = Catalog::parse("000;11;foo reg\n001;12;bar\n").unwrap();
    let asm = assemble("FOO CL\r\nBAR\r\nEND\r\n", &catalog).unwrap();
    assert_eq!(&asm.image()[..4], &[0x11, 0x02, 0x12, 0x00]);
}
