use bitvec::{order::Msb0, vec::BitVec};

use crate::{
    code_table::{Code, CodeTable},
    CodecError, Result,
};

fn lookup(table: &CodeTable, symbol: u8) -> Result<&Code> {
    table.code(symbol).ok_or(CodecError::MissingCode(symbol))
}

/// Concatenate the code of every input symbol, as a string of `'0'` and `'1'`.
pub fn encode(input: &[u8], table: &CodeTable) -> Result<String> {
    let mut out = String::with_capacity(input.len());
    for &symbol in input {
        let code = lookup(table, symbol)?;
        out.extend(code.bits().iter().map(|bit| if *bit { '1' } else { '0' }));
    }
    Ok(out)
}

/// Like [`encode`], but packs the bits instead of spelling them out.
pub fn encode_bits(input: &[u8], table: &CodeTable) -> Result<BitVec<u8, Msb0>> {
    let mut out = BitVec::with_capacity(input.len());
    for &symbol in input {
        out.extend_from_bitslice(lookup(table, symbol)?.bits());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{frequency::FrequencyTable, tree::PrefixTree};

    fn table(input: &[u8]) -> CodeTable {
        let tree = PrefixTree::build(&FrequencyTable::from_symbols(input)).unwrap();
        CodeTable::from_tree(&tree)
    }

    #[test_case(b"abracadabra", "01101001110011110110100")]
    #[test_case(b"aaaaaaaab", "111111110")]
    #[test_case(b"aaaa", "1111")]
    fn encodes(input: &[u8], expected: &str) {
        assert_eq!(encode(input, &table(input)).unwrap(), expected);
    }

    #[test]
    fn packed_matches_string() -> anyhow::Result<()> {
        let input = b"she sells sea shells by the sea shore";
        let table = table(input);
        let spelled = encode(input, &table)?;
        let packed = encode_bits(input, &table)?;
        let respelled: String = packed
            .iter()
            .by_vals()
            .map(|bit| if bit { '1' } else { '0' })
            .collect();
        assert_eq!(spelled, respelled);
        Ok(())
    }

    #[test]
    fn symbol_outside_table() {
        let table = table(b"abc");
        assert_eq!(encode(b"abz", &table), Err(CodecError::MissingCode(b'z')));
        assert_eq!(
            encode_bits(b"zz", &table),
            Err(CodecError::MissingCode(b'z'))
        );
    }
}
