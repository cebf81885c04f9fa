use crate::assembler::Assembly;
use crate::label::Role;
use crate::token::{Token, TokenKind};
use color_print::cformat;

const RULE: &str = "-----------------+-----------------------------------------------------";

/// Source lines rebuilt from the token stream, each next to the address and
/// bytes it produced.
pub fn listing(asm: &Assembly, color: bool) -> Vec<String> {
    let mut out = Vec::new();
    for (line_num, tokens) in token_lines(&asm.tokens) {
        let text = render_line(&tokens, color);
        let addrs: Vec<usize> = (0..asm.lines.len())
            .filter(|&addr| asm.lines[addr] == Some(line_num))
            .collect();
        if addrs.is_empty() {
            out.push(format!("{:17}| {:>4}: {}", "", line_num, text));
            continue;
        }
        for (idx, chunk) in addrs.chunks(4).enumerate() {
            let bytes = chunk
                .iter()
                .map(|&addr| format!("{:02X}", asm.memory.ram()[addr]))
                .collect::<Vec<_>>()
                .join(" ");
            let body = if idx == 0 {
                format!("{:>4}: {}", line_num, text)
            } else {
                String::new()
            };
            out.push(format!("[{:02X}] {:<11} | {}", chunk[0], bytes, body));
        }
    }
    out
}

pub fn print_dump(asm: &Assembly) {
    println!("{RULE}");
    for line in listing(asm, true) {
        println!("{line}");
    }
    println!("{RULE}");

    for def in asm.labels.definitions() {
        let uses = asm
            .labels
            .references()
            .filter(|(_, r)| r.key() == def.key())
            .map(|(_, r)| {
                let mark = match r.role {
                    Role::Absolute => "@",
                    _ => "~",
                };
                format!("{}{:02X}", mark, r.address)
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{}",
            cformat!("  <g>{:02X} {}:</> {}", def.address, def.name, uses)
        );
    }
    println!("{RULE}");
    print!("{}", asm.memory);
}

/// Tokens grouped by logical line, newlines dropped.
fn token_lines(tokens: &[Token]) -> Vec<(usize, Vec<&Token>)> {
    let mut lines: Vec<(usize, Vec<&Token>)> = Vec::new();
    let mut current = Vec::new();
    for token in tokens {
        if token.is_newline() {
            lines.push((token.pos.line, std::mem::take(&mut current)));
        } else {
            current.push(token);
        }
    }
    if let Some(first) = current.first() {
        lines.push((first.pos.line, current));
    }
    lines
}

fn render_line(tokens: &[&Token], color: bool) -> String {
    let mut out = String::new();
    let mut col = 1;
    for token in tokens {
        while col < token.pos.col {
            out.push(' ');
            col += 1;
        }
        let text = token.to_string();
        col += text.chars().count();
        let text = match (&token.kind, color) {
            (TokenKind::Label(_), true) => cformat!("<g>{}</>", text),
            (TokenKind::Comment(_), true) => cformat!("<dim>{}</>", text),
            (TokenKind::Char(_) | TokenKind::Text(_), true) => cformat!("<y>{}</>", text),
            _ => text,
        };
        out.push_str(&text);
    }
    out
}
