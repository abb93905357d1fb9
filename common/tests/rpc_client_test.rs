// Tests for the JSON-RPC client against a mocked ledger node

use httpmock::prelude::*;
use serde_json::json;
use spl_common::{
    commitment::CommitmentLevel,
    config::TOKEN_PROGRAM_ID,
    crypto::{Hash, Keypair, Pubkey, Signature},
    rpc::{client::RpcClient, LedgerRpc, RpcError},
    transaction::{AccountMeta, Instruction, Transaction},
};

#[tokio::test]
async fn test_get_signature_statuses() {
    let server = MockServer::start_async().await;
    let signature = Signature::new([7u8; 64]);

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .body_contains("getSignatureStatuses")
                .body_contains(signature.to_string())
                .body_contains("\"searchTransactionHistory\":true");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {
                    "context": { "slot": 100 },
                    "value": [{
                        "slot": 98,
                        "confirmations": 2,
                        "err": null,
                        "status": { "Ok": null },
                        "confirmationStatus": "confirmed"
                    }]
                }
            }));
        })
        .await;

    let client = RpcClient::new(server.base_url()).unwrap();
    let statuses = client
        .get_signature_statuses(&[signature], true)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(statuses.len(), 1);
    let status = statuses[0].as_ref().unwrap();
    assert_eq!(status.slot, 98);
    assert_eq!(status.confirmation_status, Some(CommitmentLevel::Confirmed));
}

#[tokio::test]
async fn test_null_statuses_read_as_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("getSignatureStatuses");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": null
            }));
        })
        .await;

    let client = RpcClient::new(server.base_url()).unwrap();
    let statuses = client
        .get_signature_statuses(&[Signature::new([1u8; 64])], false)
        .await
        .unwrap();
    assert!(statuses.is_empty());
}

#[tokio::test]
async fn test_missing_account_is_none() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("getAccountInfo");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": { "context": { "slot": 1 }, "value": null }
            }));
        })
        .await;

    let client = RpcClient::new(server.base_url()).unwrap();
    let info = client
        .get_account_info(&Pubkey::new_unique())
        .await
        .unwrap();
    assert!(info.is_none());
}

#[tokio::test]
async fn test_token_balance_error_surfaces_rpc_code() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("getTokenAccountBalance");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {
                    "code": -32602,
                    "message": "Invalid param: could not find account"
                }
            }));
        })
        .await;

    let client = RpcClient::new(server.base_url()).unwrap();
    let err = client
        .get_token_account_balance(&Pubkey::new_unique())
        .await
        .unwrap_err();

    assert!(err.is_server_error());
    assert!(err.is_account_not_found());
    assert_eq!(err.code(), Some(-32602));
}

#[tokio::test]
async fn test_http_failure_is_network_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(503);
        })
        .await;

    let client = RpcClient::new(server.base_url()).unwrap();
    let err = client.get_latest_blockhash().await.unwrap_err();
    assert!(matches!(err, RpcError::Network(_)));
}

#[tokio::test]
async fn test_send_transaction_base64() {
    let server = MockServer::start_async().await;
    let payer = Keypair::new();
    let ix = Instruction::new(
        TOKEN_PROGRAM_ID,
        vec![1],
        vec![AccountMeta::new(payer.pubkey(), true)],
    );
    let tx = Transaction::new_signed(&[ix], &payer, &[], Hash::new([1u8; 32])).unwrap();
    let expected = *tx.signature().unwrap();

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains("sendTransaction")
                .body_contains("\"encoding\":\"base64\"");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": expected.to_string()
            }));
        })
        .await;

    let client = RpcClient::new(server.base_url()).unwrap();
    let signature = client.send_transaction(&tx).await.unwrap();

    mock.assert_async().await;
    assert_eq!(signature, expected);
}

#[tokio::test]
async fn test_latest_blockhash() {
    let server = MockServer::start_async().await;
    let blockhash = Hash::new([4u8; 32]);
    server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains("getLatestBlockhash")
                .body_contains("\"commitment\":\"finalized\"");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {
                    "context": { "slot": 2 },
                    "value": {
                        "blockhash": blockhash.to_string(),
                        "lastValidBlockHeight": 3090
                    }
                }
            }));
        })
        .await;

    let client =
        RpcClient::new_with_commitment(server.base_url(), CommitmentLevel::Finalized).unwrap();
    assert_eq!(client.get_latest_blockhash().await.unwrap(), blockhash);
}
