use bitvec::prelude::*;
use huffman::{compress, decompress, packer, unpacker, CodeTable, Error, Mode, Node};
use huffman::{build_tree, FrequencyTable};

fn round_trip(text: &str, mode: Mode) {
    let c = compress(text, mode).unwrap();
    assert!(c.table.is_prefix_free());
    assert_eq!(decompress(&c.payload, &c.table).unwrap(), text);
}

#[test]
fn round_trips_plain_prose() {
    let text = "It was the best of times, it was the worst of times.";
    round_trip(text, Mode::Char);
    round_trip(text, Mode::Word);
}

#[test]
fn round_trips_control_characters() {
    let text = "line one\n\tindented\r\n\n\nnul\0here\t\t\nend";
    round_trip(text, Mode::Char);
    round_trip(text, Mode::Word);
}

#[test]
fn round_trips_punctuation_and_non_ascii() {
    let text = "«Ça va?» — “quoted” … naïve café; 1+1=2 [ok] {done} `tick` \\slash";
    round_trip(text, Mode::Char);
    round_trip(text, Mode::Word);
}

#[test]
fn round_trips_a_word_spelled_eof() {
    round_trip("eof eof and then eof", Mode::Word);
}

#[test]
fn single_symbol_alphabet() {
    let c = compress("aaaaaaaa", Mode::Char).unwrap();

    assert_eq!(c.table.len(), 1);
    assert_eq!(c.table.get("a"), Some(bits![u8, Msb0; 0]));
    assert_eq!(c.payload, vec![0x00]);
    assert_eq!(c.table.eof(), Some(0));
    assert_eq!(decompress(&c.payload, &c.table).unwrap(), "aaaaaaaa");

    round_trip("zzz", Mode::Char);
    round_trip("word", Mode::Word);
}

#[test]
fn internal_weights_are_sums_of_children() {
    fn check(node: &Node<&str>) {
        if let Node::Internal {
            weight,
            left,
            right,
        } = node
        {
            assert_eq!(weight.0, left.weight() + right.weight());
            check(left);
            check(right);
        }
    }

    let text = "peter piper picked a peck of pickled peppers";
    for mode in [Mode::Char, Mode::Word] {
        let probs = FrequencyTable::from_symbols(huffman::tokenize(text, mode))
            .probabilities()
            .unwrap();
        check(&build_tree(probs).unwrap());
    }
}

#[test]
fn packing_known_table() {
    let mut table: CodeTable<&str> = [
        ("a", bitvec![u8, Msb0; 0]),
        ("b", bitvec![u8, Msb0; 1, 0]),
        ("c", bitvec![u8, Msb0; 1, 1]),
    ]
    .into_iter()
    .collect();

    let payload = packer::pack(&mut table, ["a", "b", "c", "a"]).unwrap();
    assert_eq!(payload, vec![0x58]);
    assert_eq!(table.eof(), Some(2));

    let symbols = unpacker::unpack(&payload, &table).unwrap();
    assert_eq!(symbols, vec!["a", "b", "c", "a"]);
}

#[test]
fn mismatched_model_is_a_decode_error() {
    let text = "mississippi river";
    let mut c = compress(text, Mode::Char).unwrap();

    // Drop the code of a symbol the payload needs.
    c.table.remove("s");
    assert!(matches!(
        decompress(&c.payload, &c.table),
        Err(Error::Decode { .. })
    ));
}

#[test]
fn model_from_other_text_is_rejected_or_differs() {
    let a = compress("aaaaaaab", Mode::Char).unwrap();
    let b = compress("xyz", Mode::Char).unwrap();

    match decompress(&a.payload, &b.table) {
        Err(Error::Decode { .. }) => {}
        Ok(text) => assert_ne!(text, "aaaaaaab"),
        Err(other) => panic!("unexpected {other:?}"),
    }
}

#[test]
fn encoder_rejects_symbols_outside_the_model() {
    let c = compress("abc", Mode::Char).unwrap();
    let mut table = c.table;

    let err = packer::pack(&mut table, huffman::tokenize("abd", Mode::Char)).unwrap_err();
    assert!(matches!(err, Error::UnknownSymbol { .. }));
}
