use std::collections::HashMap;

use super::{encoding::encode_length, EncodeError, Instruction, MAX_ACCOUNT_KEYS};
use crate::crypto::{Hash, Pubkey};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageHeader {
    /// Signatures required; the first `num_required_signatures` keys sign.
    pub num_required_signatures: u8,
    /// Trailing signer keys that are read-only.
    pub num_readonly_signed_accounts: u8,
    /// Trailing non-signer keys that are read-only.
    pub num_readonly_unsigned_accounts: u8,
}

/// An instruction with its accounts replaced by indices into the message key list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub account_keys: Vec<Pubkey>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<CompiledInstruction>,
}

#[derive(Clone, Copy)]
struct KeyFlags {
    is_signer: bool,
    is_writable: bool,
}

impl Message {
    /// Compile instructions into a message paid for by `payer`.
    ///
    /// Keys are ordered writable signers, read-only signers, writable
    /// non-signers, read-only non-signers, with the payer always first.
    /// A key referenced more than once keeps the union of its flags.
    pub fn new(
        instructions: &[Instruction],
        payer: &Pubkey,
        recent_blockhash: Hash,
    ) -> Result<Self, EncodeError> {
        if instructions.is_empty() {
            return Err(EncodeError::Empty);
        }

        let mut keys: Vec<(Pubkey, KeyFlags)> = Vec::new();
        upsert(
            &mut keys,
            *payer,
            KeyFlags {
                is_signer: true,
                is_writable: true,
            },
        );
        for ix in instructions {
            for meta in &ix.accounts {
                upsert(
                    &mut keys,
                    meta.pubkey,
                    KeyFlags {
                        is_signer: meta.is_signer,
                        is_writable: meta.is_writable,
                    },
                );
            }
            upsert(
                &mut keys,
                ix.program_id,
                KeyFlags {
                    is_signer: false,
                    is_writable: false,
                },
            );
        }

        if keys.len() > MAX_ACCOUNT_KEYS {
            return Err(EncodeError::TooManyAccounts(keys.len()));
        }

        // Stable partition keeps first-seen order within each class, so the payer stays first
        let class = |flags: &KeyFlags| match (flags.is_signer, flags.is_writable) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        };
        keys.sort_by_key(|(_, flags)| class(flags));

        let mut header = MessageHeader::default();
        for (_, flags) in &keys {
            match (flags.is_signer, flags.is_writable) {
                (true, true) => header.num_required_signatures += 1,
                (true, false) => {
                    header.num_required_signatures += 1;
                    header.num_readonly_signed_accounts += 1;
                }
                (false, true) => {}
                (false, false) => header.num_readonly_unsigned_accounts += 1,
            }
        }

        let account_keys: Vec<Pubkey> = keys.into_iter().map(|(key, _)| key).collect();
        let indices = account_keys
            .iter()
            .enumerate()
            .map(|(i, key)| {
                u8::try_from(i)
                    .map(|i| (*key, i))
                    .map_err(|_| EncodeError::TooManyAccounts(account_keys.len()))
            })
            .collect::<Result<HashMap<Pubkey, u8>, _>>()?;
        let index_of = |key: &Pubkey| -> Result<u8, EncodeError> {
            indices
                .get(key)
                .copied()
                .ok_or(EncodeError::UnknownAccount(*key))
        };

        let instructions = instructions
            .iter()
            .map(|ix| {
                Ok(CompiledInstruction {
                    program_id_index: index_of(&ix.program_id)?,
                    accounts: ix
                        .accounts
                        .iter()
                        .map(|meta| index_of(&meta.pubkey))
                        .collect::<Result<_, _>>()?,
                    data: ix.data.clone(),
                })
            })
            .collect::<Result<_, EncodeError>>()?;

        Ok(Self {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        })
    }

    /// Keys that must sign, in signature order.
    pub fn signer_keys(&self) -> Vec<Pubkey> {
        self.account_keys
            .iter()
            .take(self.header.num_required_signatures as usize)
            .copied()
            .collect()
    }

    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.account_keys.first()
    }

    pub fn is_writable(&self, index: usize) -> bool {
        let signed = self.header.num_required_signatures as usize;
        let total = self.account_keys.len();
        if index < signed {
            index < signed - self.header.num_readonly_signed_accounts as usize
        } else {
            index < total - self.header.num_readonly_unsigned_accounts as usize
        }
    }

    pub fn is_signer(&self, index: usize) -> bool {
        index < self.header.num_required_signatures as usize
    }

    pub fn serialize(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        out.push(self.header.num_required_signatures);
        out.push(self.header.num_readonly_signed_accounts);
        out.push(self.header.num_readonly_unsigned_accounts);

        encode_length(compact_len(self.account_keys.len())?, &mut out);
        for key in &self.account_keys {
            out.extend_from_slice(key.as_bytes());
        }

        out.extend_from_slice(self.recent_blockhash.as_bytes());

        encode_length(compact_len(self.instructions.len())?, &mut out);
        for ix in &self.instructions {
            out.push(ix.program_id_index);
            encode_length(compact_len(ix.accounts.len())?, &mut out);
            out.extend_from_slice(&ix.accounts);
            encode_length(compact_len(ix.data.len())?, &mut out);
            out.extend_from_slice(&ix.data);
        }

        Ok(out)
    }
}

fn upsert(keys: &mut Vec<(Pubkey, KeyFlags)>, key: Pubkey, flags: KeyFlags) {
    match keys.iter_mut().find(|(k, _)| *k == key) {
        Some((_, existing)) => {
            existing.is_signer |= flags.is_signer;
            existing.is_writable |= flags.is_writable;
        }
        None => keys.push((key, flags)),
    }
}

fn compact_len(len: usize) -> Result<u16, EncodeError> {
    u16::try_from(len).map_err(|_| EncodeError::LengthOverflow(len))
}
