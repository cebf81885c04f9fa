use crate::error::{Diag, Error};
use crate::label::{Labels, Role};
use crate::memory::Memory;

/// Pass 2: patch every symbol operand with its label's address or displacement.
///
/// Definitions are visited in source order and each is paired with every
/// reference of the same (case-insensitive) name. A relative displacement is
/// `definition - reference + 1` and must fit in a signed byte; the error is
/// reported on the definition's line. References left over afterwards are
/// unresolved, reported on the first one's line.
pub fn resolve(memory: &mut Memory, labels: &Labels) -> Result<(), Diag> {
    let mut resolved = vec![false; labels.len()];

    for def in labels.definitions() {
        let key = def.key();
        for (idx, entry) in labels.references().filter(|(_, e)| e.key() == key) {
            let byte = match entry.role {
                Role::Absolute => (def.address & 0xFF) as u8,
                Role::Relative => displacement(def.address, entry.address)
                    .ok_or_else(|| {
                        Diag::new(
                            def.line,
                            Error::DisplacementOutOfRange {
                                label: key.clone(),
                                displacement: def.address as isize - entry.address as isize + 1,
                            },
                        )
                    })?,
                Role::Definition => continue,
            };
            tracing::debug!("{:02X} <- {:02X} ({})", entry.address, byte, key);
            memory.patch(entry.address, byte);
            resolved[idx] = true;
        }
    }

    match labels.references().find(|(idx, _)| !resolved[*idx]) {
        Some((_, entry)) => Err(Diag::new(
            entry.line,
            Error::UnresolvedSymbol(entry.key()),
        )),
        None => Ok(()),
    }
}

/// Signed-byte displacement from the operand byte at `reference` to `target`,
/// biased by one.
pub fn displacement(target: usize, reference: usize) -> Option<u8> {
    let disp = target as isize - reference as isize + 1;
    match i8::try_from(disp) {
        Ok(d) => Some(d as u8),
        Err(_) => None,
    }
}
