//! Transaction virtual size estimation
//!
//! Estimates the vsize of a transaction from the script types of its inputs
//! and outputs, plus an optional OP_RETURN data payload. The estimate is used
//! to price a transaction before it is built, so it only depends on how many
//! inputs and outputs of each type there are.
//!
//! Costs are accumulated in weight units (a quarter of a virtual byte) so
//! the fractional segwit overheads add up exactly and the total is rounded
//! up once at the end.

use super::encoding::{EncodingTag, ScriptEncoding};

// =============================================================================
// Constants
// =============================================================================

/// Weight units per virtual byte
pub const WITNESS_SCALE_FACTOR: u64 = 4;

/// Version, input count, output count and locktime (10 vbytes)
pub const TX_HEADER_WEIGHT: u64 = 40;

/// Segwit marker and flag bytes (0.5 vbytes)
pub const SEGWIT_MARKER_WEIGHT: u64 = 2;

/// Witness item count overhead (0.25 vbytes), charged once per transaction
pub const WITNESS_COUNT_WEIGHT: u64 = 1;

/// Per-chunk overhead of an OP_RETURN output (12 vbytes)
pub const OP_RETURN_PREFIX_WEIGHT: u64 = 48;

/// Default maximum payload bytes carried by a single OP_RETURN output
pub const DEFAULT_OP_RETURN_LIMIT: usize = 80;

/// Vsize of a transaction spending one P2WPKH input with no outputs
///
/// A conservative lower bound for callers that need a size before the
/// transaction shape is known.
pub const PLACEHOLDER_VSIZE: u64 = 79;

/// Weight of spending an input of the given type
pub fn input_weight(encoding: ScriptEncoding) -> u64 {
    match encoding {
        ScriptEncoding::P2pkh => 148 * WITNESS_SCALE_FACTOR,
        ScriptEncoding::P2wpkh => 68 * WITNESS_SCALE_FACTOR,
        ScriptEncoding::P2shP2wpkh => 91 * WITNESS_SCALE_FACTOR,
    }
}

/// Weight of creating an output of the given type
pub fn output_weight(encoding: ScriptEncoding) -> u64 {
    match encoding {
        ScriptEncoding::P2pkh => 34 * WITNESS_SCALE_FACTOR,
        ScriptEncoding::P2wpkh => 31 * WITNESS_SCALE_FACTOR,
        ScriptEncoding::P2shP2wpkh => 32 * WITNESS_SCALE_FACTOR,
    }
}

fn tag_input_weight(tag: &EncodingTag) -> u64 {
    match tag {
        EncodingTag::Known(encoding) => input_weight(*encoding),
        // Unrecognized tags are priced at zero rather than rejected
        EncodingTag::Unknown(_) => 0,
    }
}

fn tag_output_weight(tag: &EncodingTag) -> u64 {
    match tag {
        EncodingTag::Known(encoding) => output_weight(*encoding),
        EncodingTag::Unknown(_) => 0,
    }
}

// =============================================================================
// OP_RETURN chunking
// =============================================================================

/// Number of OP_RETURN outputs needed to carry `payload_len` bytes
///
/// A limit of zero is treated as one byte per output.
pub fn op_return_chunk_count(payload_len: usize, limit: usize) -> usize {
    payload_len.div_ceil(limit.max(1))
}

/// Split a payload into OP_RETURN-sized chunks of at most `limit` bytes
pub fn split_op_return(payload: &[u8], limit: usize) -> Vec<Vec<u8>> {
    payload
        .chunks(limit.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

// =============================================================================
// Estimation
// =============================================================================

/// Estimate the virtual size of a transaction
///
/// Segwit overhead is charged once if any input is native segwit, no matter
/// how many there are. Inputs and outputs with unknown tags add nothing. A
/// payload is charged 12 vbytes per chunk plus its length.
pub fn estimate_vsize(
    inputs: &[EncodingTag],
    outputs: &[EncodingTag],
    op_return: Option<&[u8]>,
    op_return_limit: usize,
) -> u64 {
    let mut weight = TX_HEADER_WEIGHT;

    let has_segwit = inputs
        .iter()
        .filter_map(EncodingTag::known)
        .any(|encoding| encoding.is_native_segwit());
    if has_segwit {
        weight += SEGWIT_MARKER_WEIGHT + WITNESS_COUNT_WEIGHT;
    }

    weight += inputs.iter().map(tag_input_weight).sum::<u64>();
    weight += outputs.iter().map(tag_output_weight).sum::<u64>();

    if let Some(payload) = op_return {
        let chunks = op_return_chunk_count(payload.len(), op_return_limit) as u64;
        weight += chunks * OP_RETURN_PREFIX_WEIGHT;
        weight += payload.len() as u64 * WITNESS_SCALE_FACTOR;
    }

    weight.div_ceil(WITNESS_SCALE_FACTOR)
}

/// String-tag variant of [`estimate_vsize`]; the payload is measured as UTF-8
pub fn estimate_vsize_str(
    inputs: &[&str],
    outputs: &[&str],
    op_return: Option<&str>,
    op_return_limit: usize,
) -> u64 {
    let inputs: Vec<EncodingTag> = inputs.iter().map(|tag| EncodingTag::from(*tag)).collect();
    let outputs: Vec<EncodingTag> = outputs.iter().map(|tag| EncodingTag::from(*tag)).collect();
    estimate_vsize(
        &inputs,
        &outputs,
        op_return.map(str::as_bytes),
        op_return_limit,
    )
}

/// Shape of a transaction to be sized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VsizeRequest {
    pub inputs: Vec<EncodingTag>,
    pub outputs: Vec<EncodingTag>,
    pub op_return: Option<Vec<u8>>,
    pub op_return_limit: usize,
}

impl Default for VsizeRequest {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
            op_return: None,
            op_return_limit: DEFAULT_OP_RETURN_LIMIT,
        }
    }
}

impl VsizeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, tag: impl Into<EncodingTag>) -> Self {
        self.inputs.push(tag.into());
        self
    }

    pub fn output(mut self, tag: impl Into<EncodingTag>) -> Self {
        self.outputs.push(tag.into());
        self
    }

    /// Attach a text payload, measured by its UTF-8 bytes
    pub fn op_return_text(mut self, text: &str) -> Self {
        self.op_return = Some(text.as_bytes().to_vec());
        self
    }

    pub fn op_return_bytes(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.op_return = Some(payload.into());
        self
    }

    pub fn op_return_limit(mut self, limit: usize) -> Self {
        self.op_return_limit = limit;
        self
    }

    /// Chunks the attached payload will be split into
    pub fn op_return_chunks(&self) -> Vec<Vec<u8>> {
        self.op_return
            .as_deref()
            .map(|payload| split_op_return(payload, self.op_return_limit))
            .unwrap_or_default()
    }

    pub fn estimate(&self) -> u64 {
        estimate_vsize(
            &self.inputs,
            &self.outputs,
            self.op_return.as_deref(),
            self.op_return_limit,
        )
    }
}
