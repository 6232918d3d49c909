use huffman::{build_code_table, code_table::code_string, compress, decompress, Mode};

fn main() {
    let s = String::from("Hello my name is Sam! Hello Sam!");

    for mode in [Mode::Char, Mode::Word] {
        let table = build_code_table(&s, mode).unwrap();
        let mut codes: Vec<_> = table.iter().map(|(sym, c)| (code_string(c), *sym)).collect();
        codes.sort();
        println!("{mode}: {codes:?}");

        let c = compress(&s, mode).unwrap();
        let dec = decompress(&c.payload, &c.table);
        println!("{} bytes -> {} bytes: {:?}", s.len(), c.payload.len(), dec);
    }
}
