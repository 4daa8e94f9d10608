//! Property tests for the byte buffer and the slab pool it's built
//! alongside.

use glyph_mem::{ByteBuffer, SlabPool};
use quickcheck_macros::quickcheck;

/// Appending two pieces in sequence is the same as appending their
/// concatenation in one call.
#[quickcheck]
fn append_is_associative_with_concatenation(a: Vec<u8>, b: Vec<u8>) -> bool {
    let mut two_calls = ByteBuffer::new();
    two_calls.append(&a).unwrap();
    two_calls.append(&b).unwrap();

    let mut one_call = ByteBuffer::new();
    let mut combined = a.clone();
    combined.extend_from_slice(&b);
    one_call.append(&combined).unwrap();

    two_calls.as_bytes() == one_call.as_bytes()
}

/// `len()` always matches the number of bytes actually appended so far.
#[quickcheck]
fn len_matches_total_appended_bytes(chunks: Vec<Vec<u8>>) -> bool {
    let mut buf = ByteBuffer::new();
    let mut total = 0usize;
    for chunk in &chunks {
        buf.append(chunk).unwrap();
        total += chunk.len();
    }
    buf.len() == total
}

/// `reset` always returns a buffer to empty and owned, regardless of
/// whether it started borrowed or already held content.
#[quickcheck]
fn reset_always_empties_the_buffer(content: Vec<u8>) -> bool {
    let mut buf = ByteBuffer::new();
    buf.append(&content).unwrap();
    buf.reset();
    buf.is_empty() && !buf.is_borrowed() && buf.len() == 0
}

/// `null_terminated` never appends more than one trailing NUL no matter
/// how many times it's called back to back.
#[quickcheck]
fn null_terminated_is_idempotent(content: Vec<u8>) -> bool {
    let mut buf = ByteBuffer::new();
    buf.append(&content).unwrap();
    let first = buf.null_terminated().to_vec();
    let second = buf.null_terminated().to_vec();
    first == second && first.last() == Some(&0)
}

/// A slab pool's `len()` always equals the number of ids that survive an
/// insert/remove sequence, and every surviving id still fetches the
/// value it was inserted with.
#[quickcheck]
fn slab_len_matches_live_ids(values: Vec<i32>, removals: Vec<usize>) -> bool {
    let mut pool: SlabPool<i32> = SlabPool::new();
    let mut live: Vec<(glyph_mem::SlabId, i32)> = values.iter().map(|v| (pool.insert(*v), *v)).collect();

    for r in removals {
        if live.is_empty() {
            break;
        }
        let idx = r % live.len();
        let (id, _) = live.remove(idx);
        pool.remove(id);
    }

    pool.len() == live.len() && live.iter().all(|(id, v)| pool.get(*id) == Some(v))
}
