// Program client tests against the in-memory ledger
//
// Mirrors the workspace's "initialize" and "mint tokens" scenarios without a
// validator: the ledger records what the client submits and confirms it.

use spl_common::{
    address::{associated_token_address, metadata_address, mint_address},
    config::{SPL_PROGRAM_ID, TOKEN_METADATA_PROGRAM_ID},
    crypto::{verify_signature, Hash},
    transaction::encoding::{instruction_discriminator, DISCRIMINATOR_SIZE},
};
use spl_testing_framework::prelude::*;

const METADATA_URI: &str = "https://5vfxc4tr6xoy23qefqbj4qx2adzkzapneebanhcalf7myvn5gzja.arweave.net/7UtxcnH13Y1uBCwCnkL6APKsge0hAgacQFl-zFW9NlI";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn metadata() -> InitTokenParams {
    InitTokenParams {
        name: "Just a Test Token".to_string(),
        symbol: "TEST".to_string(),
        uri: METADATA_URI.to_string(),
        decimals: 9,
    }
}

fn setup(ledger: Arc<MockLedger>) -> SplProgram {
    let provider = Provider::new(ledger, Keypair::new())
        .with_clock(Arc::new(PausedClock::new()))
        .with_cluster(Cluster::Localnet);
    SplProgram::new(Arc::new(provider))
}

#[tokio::test]
async fn test_initialize() {
    init_logger();
    let ledger = Arc::new(MockLedger::new().with_auto_confirm(CommitmentLevel::Confirmed));
    let program = setup(ledger.clone());

    let mint = program.mint().unwrap();
    assert_account_missing(ledger.as_ref(), &mint).await.unwrap();

    let accounts = program.init_token_accounts().unwrap();
    let signature = program.init_token(&metadata(), &accounts).await.unwrap();

    let sent = ledger.sent_transactions().await;
    assert_eq!(sent.len(), 1);
    let tx = &sent[0];
    assert_eq!(tx.signature(), Some(&signature));

    // Only the payer signs; the mint and metadata PDAs are writable
    let message = &tx.message;
    assert_eq!(message.header.num_required_signatures, 1);
    assert_eq!(message.fee_payer(), Some(&program.provider().pubkey()));
    for key in [mint, metadata_address(&mint).unwrap()] {
        let index = message.account_keys.iter().position(|k| *k == key).unwrap();
        assert!(message.is_writable(index));
        assert!(!message.is_signer(index));
    }

    let compiled = &message.instructions[0];
    let program_key = message.account_keys[compiled.program_id_index as usize];
    assert_eq!(program_key, SPL_PROGRAM_ID);
    assert_eq!(
        compiled.data[..DISCRIMINATOR_SIZE],
        instruction_discriminator("initialize")
    );
    assert_eq!(compiled.accounts.len(), 7);
    assert_eq!(
        message.account_keys[compiled.accounts[6] as usize],
        TOKEN_METADATA_PROGRAM_ID
    );

    let bytes = message.serialize().unwrap();
    assert!(verify_signature(
        &program.provider().pubkey(),
        &bytes,
        &signature
    ));

    // The ledger would now hold the mint
    ledger.set_account(mint, MockLedger::account(1_461_600)).await;
    assert_account_exists(ledger.as_ref(), &mint).await.unwrap();
}

#[tokio::test]
async fn test_mint_tokens() {
    init_logger();
    let ledger = Arc::new(MockLedger::new().with_auto_confirm(CommitmentLevel::Finalized));
    let program = setup(ledger.clone());
    let payer = program.provider().pubkey();

    let destination = associated_token_address(&payer, &mint_address(&SPL_PROGRAM_ID).unwrap())
        .unwrap();
    let initial = token_balance_or_zero(ledger.as_ref(), &destination)
        .await
        .unwrap();
    assert_eq!(initial, 0.0);

    let mint_amount = 10;
    let accounts = program.mint_tokens_accounts().unwrap();
    assert_eq!(accounts.destination, destination);

    let quantity = metadata().base_units(mint_amount).unwrap();
    program.mint_tokens(quantity, &accounts).await.unwrap();

    let sent = ledger.sent_transactions().await;
    let data = &sent[0].message.instructions[0].data;
    assert_eq!(data[DISCRIMINATOR_SIZE..], quantity.to_le_bytes());

    // Program effect: the destination now holds the minted amount
    ledger.set_token_balance(destination, quantity, 9).await;
    let post = token_balance_or_zero(ledger.as_ref(), &destination)
        .await
        .unwrap();
    assert_eq!(initial + mint_amount as f64, post);
    assert_token_balance(ledger.as_ref(), &destination, 10.0)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_failed_instruction_surfaces_payload() {
    init_logger();
    let ledger = Arc::new(MockLedger::new());
    ledger.set_blockhash(Hash::new([1u8; 32])).await;
    let program = setup(ledger.clone());

    // Precompute the signature the client will produce so the failure can be
    // scripted before submission
    let accounts = program.init_token_accounts().unwrap();
    let ix = spl_testing_framework::program::instruction::init_token(
        program.program_id(),
        &metadata(),
        &accounts,
    )
    .unwrap();
    let tx = spl_common::transaction::Transaction::new_signed(
        &[ix],
        program.provider().payer(),
        &[],
        Hash::new([1u8; 32]),
    )
    .unwrap();
    let payload = serde_json::json!({ "InstructionError": [0, { "Custom": 0 }] });
    ledger
        .script_statuses(
            *tx.signature().unwrap(),
            vec![StatusReply::Pending, StatusReply::Failed(payload.clone())],
        )
        .await;

    let err = program.init_token(&metadata(), &accounts).await.unwrap_err();
    match err {
        ProgramError::Confirmation(ConfirmationError::Transaction { err, signature }) => {
            assert_eq!(err, payload);
            assert_eq!(&signature, tx.signature().unwrap());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_transfer_and_approve() {
    init_logger();
    let ledger = Arc::new(MockLedger::new().with_auto_confirm(CommitmentLevel::Confirmed));
    let program = setup(ledger.clone());
    let payer = program.provider().pubkey();
    let mint = program.mint().unwrap();

    let recipient = Pubkey::new_unique();
    let transfer = TransferAccounts::new(payer, &recipient, &mint).unwrap();
    program.transfer(1_000, &transfer, None).await.unwrap();

    let delegate = Pubkey::new_unique();
    let approve = ApproveAccounts::new(payer, delegate, &mint).unwrap();
    program.approve(500, &approve, None).await.unwrap();

    let sent = ledger.sent_transactions().await;
    assert_eq!(sent.len(), 2);
    let selectors: Vec<_> = sent
        .iter()
        .map(|tx| tx.message.instructions[0].data[..DISCRIMINATOR_SIZE].to_vec())
        .collect();
    assert_eq!(selectors[0], instruction_discriminator("transfer"));
    assert_eq!(selectors[1], instruction_discriminator("approve"));

    // Payer appears once even though it is both fee payer and authority
    for tx in &sent {
        assert_eq!(tx.message.header.num_required_signatures, 1);
    }
}
