/// A canonical Huffman code for one symbol
///
/// `code` holds `len` bits, MSB-first, as assigned by RFC 1951 section 3.2.2.
/// Unused symbols have `len == 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HuffmanCode {
    pub symbol: u16,
    pub code: u32,
    pub len: u8,
}

/// Compute Huffman code lengths for `frequencies`, limited to `max_bits`.
///
/// Ties are resolved deterministically: once the length distribution is
/// known, symbols sorted by descending frequency and then ascending symbol
/// value receive the lengths in non-decreasing order. Equal-frequency symbols
/// therefore get shorter (or equal) codes in ascending symbol order.
///
/// Returns a vector of code lengths (0 for unused symbols).
pub fn compute_code_lengths(frequencies: &[u32], max_bits: u8) -> Vec<u8> {
    let n = frequencies.len();
    let mut lengths = vec![0u8; n];

    // Leaves ordered by (frequency, symbol) for the tree build
    let mut leaves: Vec<(usize, u32)> =
        frequencies.iter().enumerate().filter(|(_, &f)| f > 0).map(|(i, &f)| (i, f)).collect();
    leaves.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

    match leaves.len() {
        0 => return lengths,
        1 => {
            lengths[leaves[0].0] = 1;
            return lengths;
        }
        _ => {}
    }

    debug_assert!(leaves.len() <= 1usize << max_bits, "too many symbols for {} bits", max_bits);

    let depths = tree_depths(&leaves);
    let bl_count = limit_bit_counts(&depths, max_bits);

    // Assign lengths: most frequent first, lowest symbol first among equals
    let mut ranked = leaves;
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut ranked_iter = ranked.iter();
    for (bits, &count) in bl_count.iter().enumerate().skip(1) {
        for _ in 0..count {
            if let Some(&(sym, _)) = ranked_iter.next() {
                lengths[sym] = bits as u8;
            }
        }
    }

    lengths
}

/// Leaf depths of a Huffman tree built with the two-queue method.
///
/// `leaves` must be sorted by ascending frequency. On equal weight a leaf is
/// taken before an internal node, which keeps the tree as shallow as possible.
fn tree_depths(leaves: &[(usize, u32)]) -> Vec<u8> {
    let m = leaves.len();
    let total = 2 * m - 1;

    // Node i < m is leaf i; internal nodes follow in creation order
    let mut weight: Vec<u64> = leaves.iter().map(|&(_, f)| f as u64).collect();
    weight.reserve(m - 1);
    let mut parent = vec![0usize; total];

    let mut next_leaf = 0;
    let mut next_internal = m;

    for _ in 0..m - 1 {
        let mut children = [0usize; 2];
        for child in children.iter_mut() {
            let take_leaf = next_leaf < m
                && (next_internal >= weight.len() || weight[next_leaf] <= weight[next_internal]);
            if take_leaf {
                *child = next_leaf;
                next_leaf += 1;
            } else {
                *child = next_internal;
                next_internal += 1;
            }
        }

        let node = weight.len();
        weight.push(weight[children[0]] + weight[children[1]]);
        parent[children[0]] = node;
        parent[children[1]] = node;
    }

    // Parents always come after their children, so one reverse pass suffices
    let mut depth = vec![0u8; total];
    for i in (0..total - 1).rev() {
        depth[i] = depth[parent[i]].saturating_add(1);
    }

    depth.truncate(m);
    depth
}

/// Count codes per length, pushing anything deeper than `max_bits` back up
/// while keeping the code complete.
fn limit_bit_counts(depths: &[u8], max_bits: u8) -> Vec<u32> {
    let max = max_bits as usize;
    let mut bl_count = vec![0u32; max + 1];
    for &d in depths {
        bl_count[(d as usize).min(max)] += 1;
    }

    let capacity = 1u64 << max;
    let mut kraft: u64 =
        bl_count.iter().enumerate().skip(1).map(|(bits, &c)| (c as u64) << (max - bits)).sum();

    // Each step moves a leaf one level down and hangs a clamped leaf beside
    // it, shrinking the Kraft sum by exactly one unit of 2^-max.
    while kraft > capacity {
        let Some(bits) = (1..max).rev().find(|&b| bl_count[b] > 0) else {
            break;
        };
        bl_count[bits] -= 1;
        bl_count[bits + 1] += 2;
        bl_count[max] -= 1;
        kraft -= 1;
    }

    bl_count
}

/// Build canonical Huffman codes from code lengths
pub fn canonical_codes(lengths: &[u8]) -> Vec<HuffmanCode> {
    let max_bits = *lengths.iter().max().unwrap_or(&0);

    // Count codes of each length
    let mut bl_count = vec![0u32; max_bits as usize + 1];
    for &len in lengths {
        if len > 0 {
            bl_count[len as usize] += 1;
        }
    }

    // Compute first code for each bit length
    let mut next_code = vec![0u32; max_bits as usize + 1];
    let mut code = 0u32;
    for bits in 1..=max_bits as usize {
        code = (code + bl_count[bits - 1]) << 1;
        next_code[bits] = code;
    }

    // Assign codes to symbols
    lengths
        .iter()
        .enumerate()
        .map(|(sym, &len)| {
            let mut entry = HuffmanCode { symbol: sym as u16, code: 0, len };
            if len > 0 {
                entry.code = next_code[len as usize];
                next_code[len as usize] += 1;
            }
            entry
        })
        .collect()
}
