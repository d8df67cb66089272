/// Number of distinct symbols: every byte value.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence count of every byte value in an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    pub fn from_symbols(input: &[u8]) -> Self {
        let mut counts = [0; ALPHABET_SIZE];
        for &symbol in input {
            counts[symbol as usize] += 1;
        }
        Self { counts }
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Symbols with a non-zero count, with their counts, in ascending symbol order.
    pub fn present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX)
            .map(move |symbol| (symbol, self.get(symbol)))
            .filter(|&(_, count)| count != 0)
    }

    /// Number of distinct symbols present.
    pub fn distinct(&self) -> usize {
        self.present().count()
    }

    /// Length of the input this table was built from.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn abracadabra() {
        let freq = FrequencyTable::from_symbols(b"abracadabra");
        let present: Vec<_> = freq.present().collect();
        assert_eq!(
            present,
            [(b'a', 5), (b'b', 2), (b'c', 1), (b'd', 1), (b'r', 2)]
        );
        assert_eq!(freq.get(b'z'), 0);
        assert_eq!(freq.distinct(), 5);
        assert_eq!(freq.total(), 11);
    }

    #[test_case(b"", 0, 0)]
    #[test_case(b"aaaa", 1, 4)]
    #[test_case(&[0, 255, 0, 255, 128], 3, 5)]
    fn counts(input: &[u8], distinct: usize, total: u64) {
        let freq = FrequencyTable::from_symbols(input);
        assert_eq!(freq.distinct(), distinct);
        assert_eq!(freq.total(), total);
        assert_eq!(freq.is_empty(), input.is_empty());
    }

    #[test]
    fn full_alphabet() {
        let input: Vec<u8> = (0..=u8::MAX).collect();
        let freq = FrequencyTable::from_symbols(&input);
        assert_eq!(freq.distinct(), ALPHABET_SIZE);
        assert!(freq.present().all(|(_, count)| count == 1));
    }
}
