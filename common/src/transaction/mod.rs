//! Legacy transaction format: instructions, compiled messages and signing.

use log::trace;
use thiserror::Error;

use crate::crypto::{Hash, Keypair, Pubkey, Signature};

pub mod encoding;
mod message;

pub use message::{CompiledInstruction, Message, MessageHeader};

// A message may reference at most this many distinct accounts (u8 indices)
pub const MAX_ACCOUNT_KEYS: usize = 256;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Too many account keys: {0}, maximum: {MAX_ACCOUNT_KEYS}")]
    TooManyAccounts(usize),

    #[error("Array too long for compact encoding: {0}")]
    LengthOverflow(usize),

    #[error("Missing signer for account {0}")]
    MissingSigner(Pubkey),

    #[error("Message has no instructions")]
    Empty,

    #[error("Account {0} is not in the message key list")]
    UnknownAccount(Pubkey),
}

/// Account reference passed to a program instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    /// Writable account.
    pub fn new(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    /// Read-only account.
    pub fn new_readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// A single program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Pubkey,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

impl Instruction {
    pub fn new(program_id: Pubkey, data: Vec<u8>, accounts: Vec<AccountMeta>) -> Self {
        Self {
            program_id,
            accounts,
            data,
        }
    }
}

/// Signed transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub signatures: Vec<Signature>,
    pub message: Message,
}

impl Transaction {
    /// Unsigned transaction with placeholder signatures for every required signer.
    pub fn new_unsigned(message: Message) -> Self {
        let required = message.header.num_required_signatures as usize;
        Self {
            signatures: vec![Signature::default(); required],
            message,
        }
    }

    /// Compile `instructions` with `payer` as fee payer and sign with `signers`.
    pub fn new_signed(
        instructions: &[Instruction],
        payer: &Keypair,
        signers: &[&Keypair],
        recent_blockhash: Hash,
    ) -> Result<Self, EncodeError> {
        let message = Message::new(instructions, &payer.pubkey(), recent_blockhash)?;
        let mut tx = Self::new_unsigned(message);

        let mut all_signers = Vec::with_capacity(signers.len() + 1);
        all_signers.push(payer);
        all_signers.extend_from_slice(signers);
        tx.try_sign(&all_signers)?;
        Ok(tx)
    }

    /// Fill every required signature. Fails if a required signer is absent.
    pub fn try_sign(&mut self, signers: &[&Keypair]) -> Result<(), EncodeError> {
        let message_bytes = self.message.serialize()?;
        for (index, key) in self.message.signer_keys().iter().enumerate() {
            let signer = signers
                .iter()
                .find(|kp| kp.pubkey() == *key)
                .ok_or(EncodeError::MissingSigner(*key))?;
            self.signatures[index] = signer.sign_message(&message_bytes);
        }
        trace!("signed transaction with {} signature(s)", self.signatures.len());
        Ok(())
    }

    /// The transaction id (first signature).
    pub fn signature(&self) -> Option<&Signature> {
        self.signatures.first()
    }

    /// Wire bytes: compact signature array followed by the message.
    pub fn serialize(&self) -> Result<Vec<u8>, EncodeError> {
        let message = self.message.serialize()?;
        let count = u16::try_from(self.signatures.len())
            .map_err(|_| EncodeError::LengthOverflow(self.signatures.len()))?;

        let mut out = Vec::with_capacity(1 + self.signatures.len() * 64 + message.len());
        encoding::encode_length(count, &mut out);
        for signature in &self.signatures {
            out.extend_from_slice(signature.as_bytes());
        }
        out.extend_from_slice(&message);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::verify_signature;

    #[test]
    fn test_signed_transaction_verifies() {
        let payer = Keypair::new();
        let program = Pubkey::new_unique();
        let ix = Instruction::new(
            program,
            vec![1, 2, 3],
            vec![AccountMeta::new(payer.pubkey(), true)],
        );

        let tx = Transaction::new_signed(&[ix], &payer, &[], Hash::new([9u8; 32])).unwrap();
        assert_eq!(tx.signatures.len(), 1);

        let message = tx.message.serialize().unwrap();
        assert!(verify_signature(
            &payer.pubkey(),
            &message,
            tx.signature().unwrap()
        ));

        let wire = tx.serialize().unwrap();
        assert_eq!(wire[0], 1);
        assert_eq!(&wire[1..65], tx.signatures[0].as_bytes());
        assert_eq!(&wire[65..], &message[..]);
    }

    #[test]
    fn test_missing_signer_rejected() {
        let payer = Keypair::new();
        let authority = Pubkey::new_unique();
        let ix = Instruction::new(
            Pubkey::new_unique(),
            vec![],
            vec![AccountMeta::new_readonly(authority, true)],
        );

        assert_eq!(
            Transaction::new_signed(&[ix], &payer, &[], Hash::zero()),
            Err(EncodeError::MissingSigner(authority))
        );
    }

    #[test]
    fn test_extra_signer_used() {
        let payer = Keypair::new();
        let authority = Keypair::new();
        let ix = Instruction::new(
            Pubkey::new_unique(),
            vec![],
            vec![AccountMeta::new_readonly(authority.pubkey(), true)],
        );

        let tx = Transaction::new_signed(&[ix], &payer, &[&authority], Hash::zero()).unwrap();
        assert_eq!(tx.signatures.len(), 2);
        let message = tx.message.serialize().unwrap();
        assert!(verify_signature(&authority.pubkey(), &message, &tx.signatures[1]));
    }
}
