//! Canonical encodings for the persistence collaborator.
//!
//! The store treats board snapshots, history and the message log as opaque
//! structured data; these helpers give it a stable MessagePack byte form plus
//! a deterministic content hash for snapshot comparison.

use rmp_serde::{decode, encode};
use thiserror::Error;

use crate::{BoardState, LogEntry};

#[derive(Debug, Error)]
pub enum WireError {
    #[error("encode error: {0}")]
    Encode(#[from] encode::Error),
    #[error("decode error: {0}")]
    Decode(#[from] decode::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn serialize_board(board: &BoardState) -> Result<Vec<u8>, WireError> {
    Ok(encode::to_vec(board)?)
}

pub fn deserialize_board(bytes: &[u8]) -> Result<BoardState, WireError> {
    Ok(decode::from_slice(bytes)?)
}

pub fn serialize_board_json(board: &BoardState) -> Result<String, WireError> {
    Ok(serde_json::to_string(board)?)
}

pub fn deserialize_board_json(json: &str) -> Result<BoardState, WireError> {
    Ok(serde_json::from_str(json)?)
}

pub fn serialize_log(log: &[LogEntry]) -> Result<Vec<u8>, WireError> {
    Ok(encode::to_vec(log)?)
}

pub fn deserialize_log(bytes: &[u8]) -> Result<Vec<LogEntry>, WireError> {
    Ok(decode::from_slice(bytes)?)
}

/// Deterministic board hash for change detection and test assertions.
///
/// Hashes the MessagePack-serialized board using FNV-1a 64-bit.
pub fn board_hash(board: &BoardState) -> Result<u64, WireError> {
    let bytes = serialize_board(board)?;
    Ok(hash_bytes_fnv1a64(&bytes))
}

/// Deterministic, stable 64-bit hash for raw bytes (FNV-1a).
pub fn hash_bytes_fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
