use huffman::CodeTable;
use huffman::Error;
use huffman::Frequency;
use huffman::FrequencyTable;
use huffman::Payload;
use huffman::SideTable;
use huffman::Tree;
use itertools::Itertools;
use std::fs;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use warn::Panic;

fn read_file<T, F: FnMut(String) -> T>(filename: &str, f: F) -> Vec<T> {
    BufReader::new(File::open(filename).unwrap())
        .lines()
        .map(|ml| ml.unwrap())
        .map(f)
        .collect()
}

fn parse_hex(hex_bytes: &str) -> Vec<u8> {
    hex_bytes.split(' ').map(|hex| u8::from_str_radix(hex, 16).unwrap()).collect()
}

fn test_cases() -> Vec<(Vec<u8>, Payload)> {
    read_file("data/test_cases", |l| {
        let v = l.split('#').collect_vec();
        assert_eq!(v.len(), 3);
        let uncompressed = parse_hex(v[0]);
        let payload = Payload {
            bytes: parse_hex(v[1]),
            padding: v[2].parse().unwrap(),
        };
        (uncompressed, payload)
    })
}

fn abc() -> FrequencyTable<char> {
    FrequencyTable::from_entries(vec![
        Frequency { symbol: 'c', count: 1 },
        Frequency { symbol: 'b', count: 2 },
        Frequency { symbol: 'a', count: 4 },
    ])
    .unwrap()
}

fn collect(symbols: Vec<char>) -> String {
    symbols.into_iter().collect()
}

#[test]
fn scenario_codes() {
    let codes = CodeTable::from_tree(&Tree::from_frequencies(&abc()).unwrap());
    let generated = codes.iter().map(|&(s, c)| format!("{}={}", s, c)).collect_vec();
    assert_eq!(generated, ["c=00", "b=01", "a=1"]);
}

#[test]
fn scenario_encode() {
    let codes = CodeTable::from_tree(&Tree::from_frequencies(&abc()).unwrap());
    let abcc = codes.encode("abcc".chars()).unwrap();
    assert_eq!((&abcc.bytes[..], abcc.padding), (&[0xa0][..], 1));
    let aaabcc = codes.encode("aaabcc".chars()).unwrap();
    assert_eq!((&aaabcc.bytes[..], aaabcc.padding), (&[0xe8, 0x00][..], 7));
    let empty = codes.encode("".chars()).unwrap();
    assert_eq!((&empty.bytes[..], empty.padding), (&[][..], 0));
}

#[test]
fn scenario_decode() {
    let tree = Tree::from_frequencies(&abc()).unwrap();
    assert_eq!(collect(tree.decode(&mut Panic, &[0xa0], 1).unwrap()), "abcc");
    assert_eq!(collect(tree.decode(&mut Panic, &[0xe8], 3).unwrap()), "aaab");
    assert_eq!(tree.decode(&mut Panic, &[0xe8], 4), Err(Error::TruncatedStream));
}

#[test]
fn scenario_single_symbol() {
    let (frequencies, payload) = huffman::compress("qqqqqqqqq".chars()).unwrap();
    let codes = CodeTable::from_tree(&Tree::from_frequencies(&frequencies).unwrap());
    assert_eq!(codes.get('q').unwrap().to_string(), "0");
    assert_eq!((&payload.bytes[..], payload.padding), (&[0x00, 0x00][..], 7));
    let decoded = huffman::decompress(&mut Panic, &frequencies, &payload).unwrap();
    assert_eq!(collect(decoded), "qqqqqqqqq");
}

#[test]
fn compress() {
    for (uncompressed, compressed) in test_cases() {
        let (_, payload) = huffman::compress(uncompressed.iter().cloned()).unwrap();
        assert_eq!(payload, compressed);
    }
}

#[test]
fn compressed_len() {
    for (uncompressed, compressed) in test_cases() {
        let frequencies = FrequencyTable::count(uncompressed.iter().cloned());
        let codes = CodeTable::from_tree(&Tree::from_frequencies(&frequencies).unwrap());
        let len = codes.encoded_len(uncompressed.iter().cloned()).unwrap();
        assert_eq!(len, compressed.bytes.len() as u64);
    }
}

#[test]
fn decompress() {
    for (uncompressed, compressed) in test_cases() {
        let frequencies = FrequencyTable::count(uncompressed.iter().cloned());
        let decompressed = huffman::decompress(&mut Panic, &frequencies, &compressed).unwrap();
        assert_eq!(decompressed, uncompressed);
    }
}

#[test]
fn side_table_file() {
    let text = fs::read_to_string("data/lorem.txt").unwrap();
    let side_text = fs::read_to_string("data/lorem.huff.freq").unwrap();
    let compressed = fs::read("data/lorem.huff").unwrap();

    let (frequencies, payload) = huffman::compress(text.chars()).unwrap();
    let side = SideTable::new(frequencies, payload.padding);
    assert_eq!(side.to_string(), side_text);
    assert_eq!(payload.bytes, compressed);

    let parsed = SideTable::parse(&mut Panic, &side_text).unwrap();
    assert_eq!(parsed, side);
    let payload = Payload {
        bytes: compressed,
        padding: parsed.padding,
    };
    let decompressed = huffman::decompress(&mut Panic, &parsed.frequencies, &payload).unwrap();
    assert_eq!(collect(decompressed), text);
}

#[test]
fn empty_file() {
    let (frequencies, payload) = huffman::compress("".chars()).unwrap();
    let side = SideTable::new(frequencies, payload.padding);
    assert_eq!(side.to_string(), "0");
    let parsed = SideTable::parse(&mut Panic, "0").unwrap();
    let decompressed = huffman::decompress(&mut Panic, &parsed.frequencies, &payload).unwrap();
    assert!(decompressed.is_empty());
}

#[test]
fn truncated_file() {
    let text = fs::read_to_string("data/lorem.txt").unwrap();
    let (frequencies, mut payload) = huffman::compress(text.chars()).unwrap();
    payload.bytes.pop();
    let result = huffman::decompress(&mut warn::Ignore, &frequencies, &payload);
    // Dropping a whole byte either cuts a code in half or loses symbols.
    match result {
        Err(Error::TruncatedStream) => {}
        Ok(decoded) => assert!(decoded.len() < text.chars().count()),
        Err(e) => panic!("unexpected error {:?}", e),
    }
}
