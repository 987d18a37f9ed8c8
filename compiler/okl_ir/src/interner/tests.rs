use super::*;

#[test]
fn intern_then_lookup() {
    let interner = StringInterner::new();
    let name = interner.intern("blockIdx");
    assert_eq!(interner.lookup(name), "blockIdx");
}

#[test]
fn same_string_same_name() {
    let interner = StringInterner::new();
    let a = interner.intern("o");
    let b = interner.intern("o");
    assert_eq!(a, b);
    assert_ne!(a, interner.intern("i"));
}

#[test]
fn empty_string_is_index_zero() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(Name::EMPTY.index(), 0);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn attribute_and_type_names_are_preinterned() {
    let interner = StringInterner::new();
    assert!(interner.get("kernel").is_some());
    assert!(interner.get("exclusive").is_some());
    assert!(interner.get("size_t").is_some());
    assert!(interner.get("partialSums").is_none());
}

#[test]
fn len_counts_distinct_strings() {
    let interner = StringInterner::new();
    let before = interner.len();
    interner.intern("fresh_identifier");
    interner.intern("fresh_identifier");
    assert_eq!(interner.len(), before + 1);
    assert!(!interner.is_empty());
}

#[test]
fn unknown_name_looks_up_empty() {
    let small = StringInterner::new();
    let big = StringInterner::new();
    let mut last = Name::EMPTY;
    for i in 0..small.len() + 4 {
        last = big.intern(&format!("n{i}"));
    }
    assert_eq!(small.lookup(last), "");
}

#[test]
fn shared_across_threads() {
    let interner: SharedInterner = Arc::new(StringInterner::new());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let interner = Arc::clone(&interner);
            std::thread::spawn(move || interner.intern(&format!("var{}", t % 2)))
        })
        .collect();
    let names: Vec<Name> = handles
        .into_iter()
        .map(|h| h.join().unwrap_or_default())
        .collect();
    assert_eq!(names[0], names[2]);
    assert_eq!(names[1], names[3]);
    assert_eq!(interner.lookup(names[1]), "var1");
}
