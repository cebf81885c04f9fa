use crate::error::CatalogError;
use crate::group::Group;
use crate::shape::Shape;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;

const DEFAULT_TABLE: &str = include_str!("../res/instruction.data");

pub const END: &str = "END";

/// One line of the instruction table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub entry: String,
    pub mnemonic: String,
    pub opcode: u8,
    pub shape: Shape,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    descriptors: Vec<Descriptor>,
    groups: IndexMap<String, Group>,
}

impl Catalog {
    /// Parse an instruction table. Lines are `entry;opcode;MNEM [shape]`,
    /// blank lines and `//` lines are skipped, everything is upper-cased.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut descriptors = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            descriptors.push(parse_line(idx + 1, &line.to_uppercase())?);
        }

        let mut signatures: IndexMap<String, u32> = IndexMap::new();
        for desc in &descriptors {
            *signatures.entry(desc.mnemonic.clone()).or_insert(0) += desc.shape.bit();
        }

        let mut groups = IndexMap::new();
        for (mnemonic, signature) in signatures {
            let group = Group::from_signature(signature).ok_or_else(|| {
                CatalogError::MalformedSignature {
                    mnemonic: mnemonic.clone(),
                    signature,
                }
            })?;
            groups.insert(mnemonic, group);
        }

        if !groups.contains_key(END) {
            descriptors.push(Descriptor {
                entry: String::new(),
                mnemonic: END.to_string(),
                opcode: 0x00,
                shape: Shape::Implied,
            });
            groups.insert(END.to_string(), Group::Implied);
        }

        for (mnemonic, group) in &groups {
            tracing::debug!("{mnemonic:<6} -> group {}", group.id());
        }

        Ok(Self {
            descriptors,
            groups,
        })
    }

    /// The bundled instruction table.
    pub fn builtin() -> Result<&'static Catalog, CatalogError> {
        static BUILTIN: OnceCell<Catalog> = OnceCell::new();
        BUILTIN.get_or_try_init(|| Catalog::parse(DEFAULT_TABLE))
    }

    /// Mnemonics are matched case-sensitively.
    pub fn group(&self, mnemonic: &str) -> Option<Group> {
        self.groups.get(mnemonic).copied()
    }

    /// Opcode of the first listed variant, written before the operands are known.
    pub fn placeholder(&self, mnemonic: &str) -> Option<u8> {
        self.descriptors
            .iter()
            .find(|d| d.mnemonic == mnemonic)
            .map(|d| d.opcode)
    }

    pub fn opcode(&self, mnemonic: &str, shape: Shape) -> Option<u8> {
        self.descriptors
            .iter()
            .find(|d| d.mnemonic == mnemonic && d.shape == shape)
            .map(|d| d.opcode)
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, Group)> {
        self.groups.iter().map(|(m, g)| (m.as_str(), *g))
    }
}

fn parse_line(line: usize, text: &str) -> Result<Descriptor, CatalogError> {
    let mut fields = text.split(';');
    let (Some(entry), Some(opcode), Some(pattern)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(CatalogError::MissingField { line });
    };

    let opcode = opcode.trim();
    let opcode = u8::from_str_radix(opcode, 16).map_err(|_| CatalogError::BadOpcode {
        line,
        opcode: opcode.to_string(),
    })?;

    let pattern = pattern.trim();
    let (mnemonic, operands) = match pattern.split_once(char::is_whitespace) {
        Some((mnemonic, operands)) => (mnemonic, operands.trim()),
        None => (pattern, ""),
    };
    if mnemonic.is_empty() {
        return Err(CatalogError::MissingField { line });
    }
    let shape = Shape::parse(operands).ok_or_else(|| CatalogError::UnknownPattern {
        line,
        pattern: pattern.to_string(),
    })?;

    Ok(Descriptor {
        entry: entry.trim().to_string(),
        mnemonic: mnemonic.to_string(),
        opcode,
        shape,
    })
}
