//! Mappers generated by `#[derive(FieldMapper)]`.

use fieldgen::FieldMapper;

#[derive(Debug, Clone, PartialEq, FieldMapper)]
struct Shipment {
    id: String,
    sender: String,
    receiver: String,
}

#[derive(Debug, Clone, PartialEq, FieldMapper)]
#[fieldgen(record)]
struct Reading {
    id: String,
    quantity: u32,
}

#[derive(Debug, PartialEq, FieldMapper)]
struct Pair<T> {
    left: T,
    right: T,
}

fn shipment() -> Shipment {
    Shipment {
        id: "SHP-1".to_string(),
        sender: "Alice".to_string(),
        receiver: "Bob".to_string(),
    }
}

fn blank() -> Shipment {
    Shipment {
        id: String::new(),
        sender: String::new(),
        receiver: String::new(),
    }
}

#[test]
fn test_swap_sender_and_receiver() {
    let source = shipment();
    let mut target = blank();

    let mut mapper = ShipmentFieldMapper::builder(&source)
        .set_sender(|source, _, set| set(source.receiver.clone()))
        .set_receiver(|source, _, set| set(source.sender.clone()))
        .build();
    mapper.map_all_to(&mut target);

    assert_eq!(target.id, "SHP-1");
    assert_eq!(target.sender, "Bob");
    assert_eq!(target.receiver, "Alice");
    assert_eq!(source, shipment());
}

#[test]
fn test_default_mapper_copies_every_field() {
    let source = shipment();
    let mut target = blank();

    ShipmentFieldMapper::builder(&source).build().map_all_to(&mut target);

    assert_eq!(target, source);
}

#[test]
fn test_skipping_the_setter_leaves_target_untouched() {
    let source = shipment();
    let mut target = Shipment {
        id: "KEEP".to_string(),
        ..blank()
    };

    ShipmentFieldMapper::builder(&source)
        .set_id(|_, _, _| {})
        .build()
        .map_all_to(&mut target);

    assert_eq!(target.id, "KEEP");
    assert_eq!(target.sender, "Alice");
}

#[test]
fn test_record_map_all_builds_a_new_record() {
    let record = Reading {
        id: "REC-1".to_string(),
        quantity: 4,
    };

    let mut mapper = ReadingFieldMapper::builder(&record)
        .map_id(|_, id| format!("{id}-mapped"))
        .map_quantity(|_, quantity| quantity + 1)
        .build();
    let mapped = mapper.map_all();

    assert_eq!(
        mapped,
        Reading {
            id: "REC-1-mapped".to_string(),
            quantity: 5,
        }
    );
    assert_eq!(mapper.source().id, "REC-1");
    assert_eq!(record.quantity, 4);
}

#[test]
fn test_record_callbacks_see_the_whole_source() {
    let record = Reading {
        id: "REC-1".to_string(),
        quantity: 4,
    };

    let mapped = ReadingFieldMapper::builder(&record)
        .map_quantity(|source, quantity| quantity * source.id.len() as u32)
        .build()
        .map_all();

    assert_eq!(mapped.id, "REC-1");
    assert_eq!(mapped.quantity, 20);
}

#[test]
fn test_generic_mapper() {
    let source = Pair { left: 1, right: 2 };
    let mut target = Pair { left: 0, right: 0 };
    let mut writes = 0;

    PairFieldMapper::builder(&source)
        .set_left(|source, _, set| {
            writes += 1;
            set(source.right)
        })
        .set_right(|source, _, set| set(source.left))
        .build()
        .map_all_to(&mut target);

    assert_eq!(target, Pair { left: 2, right: 1 });
    assert_eq!(writes, 1);
}

#[derive(Debug, PartialEq)]
struct Handle(u32);

#[derive(Debug, PartialEq, FieldMapper)]
struct Job {
    name: String,
    handle: Handle,
}

#[test]
fn test_non_clone_member_with_every_callback_set() {
    let source = Job {
        name: "sync".to_string(),
        handle: Handle(7),
    };
    let mut target = Job {
        name: String::new(),
        handle: Handle(0),
    };

    JobFieldMapper::builder(&source)
        .set_name(|_, name, set| set(name.to_uppercase()))
        .set_handle(|_, handle, set| set(Handle(handle.0 + 1)))
        .try_build()
        .unwrap()
        .map_all_to(&mut target);

    assert_eq!(
        target,
        Job {
            name: "SYNC".to_string(),
            handle: Handle(8),
        }
    );
}

#[test]
fn test_try_build_without_every_callback() {
    let source = Job {
        name: "sync".to_string(),
        handle: Handle(7),
    };

    let mapper = JobFieldMapper::builder(&source)
        .set_name(|_, name, set| set(name.clone()))
        .try_build();

    assert!(mapper.is_none());
}
