//! Integration tests for spawn_format (catalog and spawn files)

use spawn_format::*;
use tempfile::TempDir;

const CATALOG: &str = r#"//Index Rate Name Level HP MP MinDmg MaxDmg Def MagicDef AttackRate Success MoveRange AttackType ViewRange AttackRange MoveSpeed AttackSpeed RegenTime Attribute
7	1	"Bull Fighter"	6	100	0	16	20	6	0	28	6	3	0	5	1	5	400	1600	2	0	0	0	0	0	0	0	0	0	0	0	0
100	1	"Lance"	1	1	0	1	1	1	0	1	1	0	0	0	0	0	0	0	1	0	0	0	0	0	0	0	0	0	0	0	0
240	1	"Guard"	1	1	0	1	1	1	0	1	1	0	0	0	0	0	0	0	0	0	0	0	0	0	0	0	0	0	0	0	0
300	1	"Short Entry"	1
"#;

const NORIA: &str = "\
//=====
// NPCS
//=====
0
//Monster      MapNumber      Range      PositionX      PositionY      Direction      Comment
240           3             0           120           130           3             //Guard
end

1
7 3 20 100 120 110 130 -1 5 //Bull Fighter
100 3 0 40 40 40 40 -1 1 //Lance
end
";

fn catalog() -> MonsterCatalog {
    CatalogParser::parse(CATALOG).catalog
}

#[test]
fn test_catalog_example_record() {
    let parsed = CatalogParser::parse(CATALOG);
    let bull = parsed.catalog.get(7).unwrap();

    assert_eq!(bull.display_name, "Bull Fighter");
    assert_eq!(bull.kind, MonsterKind::Creature);
    assert_eq!(bull.stats.as_ref().unwrap().hp, 100);
    assert_eq!(parsed.catalog.kind_of(100), MonsterKind::Trap);
    assert_eq!(parsed.catalog.kind_of(240), MonsterKind::Npc);
    assert!(parsed.warnings.is_empty());
}

#[test]
fn test_short_catalog_record_has_no_stats() {
    let catalog = catalog();
    let short = catalog.get(300).unwrap();

    assert!(short.stats.is_none());
    assert!(!short.kind_resolved);
    assert_eq!(short.kind, MonsterKind::Creature);
}

#[test]
fn test_catalog_search_groups() {
    let catalog = catalog();

    let all = catalog.search("");
    assert_eq!(all.npcs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![240]);
    assert_eq!(all.monsters.iter().map(|d| d.id).collect::<Vec<_>>(), vec![7, 100, 300]);

    let bull = catalog.search("BULL");
    assert!(bull.npcs.is_empty());
    assert_eq!(bull.monsters.len(), 1);

    assert_eq!(catalog.search("24").npcs.len(), 1);
}

#[test]
fn test_catalog_update_changes_kind() {
    let mut catalog = catalog();
    let stats = catalog.get(7).unwrap().stats.clone().unwrap();

    let previous = catalog.update(
        7,
        MonsterUpdate {
            display_name: "Bull Chief".to_string(),
            kind: MonsterKind::Npc,
            stats,
        },
    );

    assert_eq!(previous, Some(MonsterKind::Creature));
    assert_eq!(catalog.kind_of(7), MonsterKind::Npc);
    assert_eq!(catalog.name_of(7), "Bull Chief");
    assert_eq!(catalog.get(7).unwrap().stats.as_ref().unwrap().attribute, Some(0));
    assert_eq!(
        catalog.update(
            999,
            MonsterUpdate {
                display_name: String::new(),
                kind: MonsterKind::Trap,
                stats: MonsterStats::default(),
            }
        ),
        None
    );
}

#[test]
fn test_decode_example_file() {
    let decoded = SpawnCodec::decode_for_map(NORIA, &catalog(), Some(3));

    assert!(decoded.warnings.is_empty());
    assert_eq!(decoded.placements.len(), 3);

    let bull = &decoded.placements[1];
    assert_eq!(bull.monster_id, 7);
    assert_eq!(bull.range, 20);
    assert_eq!(bull.position, GridPoint::new(100, 120));
    assert_eq!(bull.area_end, GridPoint::new(110, 130));
    assert_eq!(bull.direction, -1);
    assert_eq!(bull.quantity, 5);
    assert_eq!(bull.kind, MonsterKind::Creature);

    assert_eq!(decoded.placements[2].kind, MonsterKind::Trap);
}

#[test]
fn test_reencoded_file_reproduces_fields() {
    let catalog = catalog();
    let first = SpawnCodec::decode(NORIA, &catalog);
    let text = SpawnCodec::encode(&first.placements, &catalog);
    let second = SpawnCodec::decode(&text, &catalog);

    assert_eq!(first.placements, second.placements);
    assert!(text.contains("//Bull Fighter"));
    assert!(text.contains("// MONSTERS"));
}

#[test]
fn test_extended_kinds_read_back_as_creature() {
    let catalog = catalog();
    let placements = vec![
        SpawnPlacement::point(7, 3, GridPoint::new(1, 2), MonsterKind::Swarm),
        SpawnPlacement::point(7, 3, GridPoint::new(3, 4), MonsterKind::Event),
    ];
    let decoded = SpawnCodec::decode(&SpawnCodec::encode(&placements, &catalog), &catalog);

    assert!(decoded
        .placements
        .iter()
        .all(|p| p.kind == MonsterKind::Creature));
}

#[test]
fn test_save_and_load_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("003 - Noria.txt");
    let catalog = catalog();
    let placements = SpawnCodec::decode(NORIA, &catalog).placements;

    SpawnCodec::save(&path, &placements, &catalog).unwrap();
    let loaded = SpawnCodec::load(&path, &catalog, Some(3)).unwrap();

    assert_eq!(loaded.placements, placements);
}

#[test]
fn test_missing_files_report_paths() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.txt");

    match SpawnCodec::load(&missing, &MonsterCatalog::new(), None) {
        Err(FormatError::MapLoad { path, .. }) => assert_eq!(path, missing),
        other => panic!("Expected MapLoad, got {:?}", other.map(|d| d.placements.len())),
    }
    assert!(matches!(
        CatalogParser::load(&missing),
        Err(FormatError::CatalogLoad { .. })
    ));

    let unwritable = dir.path().join("no_such_dir").join("out.txt");
    assert!(matches!(
        SpawnCodec::save(&unwritable, &[], &MonsterCatalog::new()),
        Err(FormatError::MapSave { .. })
    ));
}

#[test]
fn test_list_maps_skips_event_files() {
    let dir = TempDir::new().unwrap();
    for name in ["003 - Noria.txt", "000 - Lorencia.txt", "Event - Blood Castle.txt", "readme.md"] {
        std::fs::write(dir.path().join(name), "").unwrap();
    }
    std::fs::create_dir(dir.path().join("old.txt")).unwrap();

    let maps = list_maps(dir.path()).unwrap();
    assert_eq!(maps, vec!["000 - Lorencia.txt", "003 - Noria.txt"]);
}
