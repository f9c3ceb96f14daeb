//! Built-in product catalog.
//!
//! Prices are net unit prices in euros. Negative prices are deductions
//! against the main product (e.g. omitting the filling).

use super::product::{Product, ProductUnit};
use super::{Catalog, CategoryProducts, GateType};

type Row = (u32, &'static str, f64, ProductUnit);

const A: ProductUnit = ProductUnit::SquareMetre;
const P: ProductUnit = ProductUnit::Piece;
const L: ProductUnit = ProductUnit::LinearMetre;

/// Accessories offered for every gate type.
const GENERAL_ACCESSORIES: &[Row] = &[
    (200, "Betoplan", 23.0, A),
    (201, "Blech verzinkt 0,75mm", 15.0, A),
    (202, "Garagentorblech verzinkt", 27.0, A),
    (203, "Garagentorblech verzinkt in Teak", 47.0, A),
    (204, "Niro-Blech 1mm", 78.0, A),
    (205, "KU-Profil weiß 18mm", 27.0, A),
    (206, "Lärchenholz", 17.0, A),
    (207, "3-Schichtplatte NR: 10010892", 27.0, A),
    (208, "3-Schichtplatte NR: 10001376", 40.0, A),
    (209, "3-Schichtplatte NR: 10001377", 52.0, A),
    (210, "3-Schichtplatte NR: 10010888", 54.0, A),
    (211, "3-Schichtplatte NR: 10010889", 76.0, A),
    (212, "3-Schichtplatte NR: 10001378", 84.0, A),
    (213, "3-Schichtplatte NR: 10010890", 84.0, A),
    (214, "3-Schichtplatte NR: 10001379", 115.0, A),
    (215, "3-Schichtplatte NR: 10010891", 120.0, A),
    (216, "KU-Verglasung 8mm", 68.0, A),
    (217, "KU-Verglasung 16mm", 91.0, A),
    (218, "Plexiglas 5mm", 119.0, A),
    (219, "Isolierglas", 208.0, A),
    (220, "Schlösser gleichsperrend", 5.5, P),
    (221, "Zylinderschloss", 20.5, P),
    (222, "Zylinderschloss, gleichsperrend", 26.0, P),
    (223, "Torhalter KU", 12.5, P),
    (224, "Gegenhalter Gummi", 12.5, P),
    (225, "Gummi 4mm", 54.0, L),
    (226, "Katzentürl", 162.0, P),
    (227, "KU-Glas 8mm in ganzen Platten", 25.0, A),
    (228, "KU-Glas 8mm zugeschnitten", 32.5, A),
    (229, "KU-Glas 16mm in ganzen Platten", 46.6, A),
    (230, "KU-Glas 16mm zugeschnitten", 60.6, A),
    (231, "KU H-Profil für 16mm Glas", 17.0, L),
    (232, "Alu U-Profil 16mm nicht montiert", 5.0, L),
    (233, "Alu U-Profil 16mm montiert", 9.0, L),
    (234, "Alu U-Profil 16mm 25x25x25x2 nicht montiert", 6.0, L),
    (235, "Spezial Alu U-Profil nicht montiert", 9.0, L),
    (236, "Spezial Alu U-Profil montiert", 13.0, L),
    (237, "Betoplan in ganzen Platten", 21.5, A),
    (238, "Betoplan zugeschnitten", 36.5, A),
];

const DOORS_MAIN: &[Row] = &[
    (1, "Türe aussen Holz/innen Holz", 225.0, A),
    (2, "Türe mit einwandiger Holzfüllung", 202.0, A),
    (3, "Türe ohne Füllung", 168.0, A),
    (4, "Doppelflüglig bis max 4m²", 139.0, A),
    (5, "Waagrecht geteilte Tür", 132.0, A),
    (6, "Fensterschutzgitter für Pferdeboxen", 131.0, A),
];

const DOORS_ACCESSORIES: &[Row] = &[
    (7, "Versenkter Muschelgriff", 39.0, P),
    (8, "Feststehendes Fenster ohne Glas", 55.0, P),
    (9, "Schiebefenster ohne Glas", 128.0, P),
    (10, "Feststehende Oberlichte ohne Glas", 147.0, A),
    (11, "Feststehende Oberlichte mit Kippfenster ohne Glas", 189.0, A),
];

const WING_GATES_MAIN: &[Row] = &[
    (12, "Flügeltor bis 4 m²", 225.0, A),
    (13, "Flügeltor bis 7 m²", 221.0, A),
    (14, "Flügeltor bis 11 m²", 185.0, A),
    (15, "Flügeltor bis 15 m²", 161.0, A),
    (16, "Flügeltor bis 20 m²", 145.0, A),
    (17, "Flügeltor über 20 m²", 139.0, A),
    (23, "Falttor bis 4 m²", 225.0, A),
    (24, "Falttor bis 7 m²", 221.0, A),
    (25, "Falttor bis 11 m²", 185.0, A),
    (26, "Falttor bis 15 m²", 161.0, A),
    (27, "Falttor bis 20 m²", 145.0, A),
    (28, "Falttor über 20 m²", 139.0, A),
];

const WING_GATES_ACCESSORIES: &[Row] = &[
    (18, "mit einwandiger Holzfüllung", -13.0, A),
    (19, "ohne Füllung", -37.0, A),
    (20, "Gehtüre eingebaut", 320.0, P),
    (21, "Waagrecht geteiltes Tor", 148.0, A),
    (22, "zusätzl. Exzenter-Feststellriegel", 19.0, P),
    (29, "Aufpreis zum Flügeltor je Faltung", 182.0, P),
    (30, "Führungsschiene mit Rollen und Halterung", 47.0, L),
    (31, "Feststehendes Fenster ohne Glas", 76.0, P),
    (32, "Schiebefenster ohne Glas", 147.0, P),
    (33, "Schiebefenster zweiteilig ohne Glas", 264.0, P),
];

const PUSH_GATES_MAIN: &[Row] = &[
    (34, "Schubtor bis 4 m²", 207.0, A),
    (35, "Schubtor bis 7 m²", 173.0, A),
    (36, "Schubtor bis 11 m²", 144.0, A),
    (37, "Schubtor bis 15 m²", 124.0, A),
    (38, "Schubtor bis 20 m²", 108.0, A),
    (39, "Schubtor über 20 m²", 105.0, A),
    (43, "Schiebetür bis 3m²", 195.0, A),
];

const PUSH_GATES_ACCESSORIES: &[Row] = &[
    (40, "Minderpreis einwandige Füllung", -13.0, A),
    (41, "ohne Füllung", -37.0, A),
    (42, "Teilung über 2,5m", 182.0, P),
    (44, "feststehendes Fenster ohne Glas", 56.0, P),
    (45, "Schiebefenster innen (nur bei einwandiger Füllung)", 139.0, P),
    (46, "Schiebefenster aussen", 165.0, P),
    (47, "Gehtür eingebaut", 320.0, P),
    (48, "Schubtorverschluss in Mauerleibung", 33.0, P),
    (49, "Versenkter Muschelgriff mit Niro-Klappring", 39.0, P),
    (50, "Hakenschloss", 106.0, P),
];

const SLIDING_DOORS_MAIN: &[Row] = &[
    (55, "Betoplan", 23.0, A),
    (56, "Blech verzinkt 0,75mm", 15.0, A),
    (57, "Garagentorblech verzinkt", 27.0, A),
    (58, "Garagentorblech verzinkt in Teak", 47.0, A),
    (59, "Niro-Blech 1mm", 78.0, A),
    (60, "Lärchenholz", 17.0, A),
    (93, "KU-Profil weiß 18mm", 27.0, A),
];

const SLIDING_DOORS_ACCESSORIES: &[Row] = &[
    (61, "3-Schichtplatte NR: 10010892", 27.0, A),
    (62, "3-Schichtplatte NR: 10001376", 40.0, A),
    (63, "3-Schichtplatte NR: 10001377", 52.0, A),
    (64, "3-Schichtplatte NR: 10010888", 54.0, A),
    (65, "3-Schichtplatte NR: 10010889", 76.0, A),
    (66, "3-Schichtplatte NR: 10001378", 84.0, A),
    (67, "3-Schichtplatte NR: 10010890", 84.0, A),
    (68, "3-Schichtplatte NR: 10001379", 115.0, A),
    (69, "3-Schichtplatte NR: 10010891", 120.0, A),
    (70, "KU-Verglasung 8mm", 68.0, A),
    (71, "KU-Verglasung 16mm", 91.0, A),
    (72, "Plexiglas 5mm", 119.0, A),
    (73, "Isolierglas", 208.0, A),
    (74, "Schlösser gleichsperrend", 5.5, P),
    (75, "Zylinderschloss", 20.5, P),
    (76, "Zylinderschloss, gleichsperrend", 26.0, P),
    (77, "Torhalter KU", 12.5, P),
    (78, "Gegenhalter Gummi", 12.5, P),
    (79, "Gummi 4mm", 54.0, L),
    (80, "Katzentürl", 162.0, P),
    (81, "KU-Glas 8mm in ganzen Platten", 25.0, A),
    (82, "KU-Glas 8mm zugeschnitten", 32.5, A),
    (83, "KU-Glas 16mm in ganzen Platten", 46.6, A),
    (84, "KU-Glas 16mm zugeschnitten", 60.6, A),
    (85, "KU H-Profil für 16mm Glas", 17.0, L),
    (86, "Alu U-Profil 16mm nicht montiert", 5.0, L),
    (87, "Alu U-Profil 16mm montiert", 9.0, L),
    (88, "Alu U-Profil 16mm 25x25x25x2 nicht montiert", 6.0, L),
    (89, "Spezial Alu U-Profil nicht montiert", 9.0, L),
    (90, "Spezial Alu U-Profil montiert", 13.0, L),
    (91, "Betoplan in ganzen Platten", 21.5, A),
    (92, "Betoplan zugeschnitten", 36.5, A),
];

fn products(rows: &[Row]) -> Vec<Product> {
    rows.iter()
        .map(|&(id, name, price, unit)| Product::new(id, name, price, unit))
        .collect()
}

fn category(main: &[Row], accessories: &[Row]) -> CategoryProducts {
    CategoryProducts {
        main: products(main),
        accessories: products(accessories),
    }
}

/// Build the catalog shipped with the tool.
pub(crate) fn builtin_catalog() -> Catalog {
    let mut catalog = Catalog::new(products(GENERAL_ACCESSORIES));
    catalog.insert(GateType::Doors, category(DOORS_MAIN, DOORS_ACCESSORIES));
    catalog.insert(
        GateType::WingGates,
        category(WING_GATES_MAIN, WING_GATES_ACCESSORIES),
    );
    catalog.insert(
        GateType::PushGates,
        category(PUSH_GATES_MAIN, PUSH_GATES_ACCESSORIES),
    );
    catalog.insert(
        GateType::SlidingDoors,
        category(SLIDING_DOORS_MAIN, SLIDING_DOORS_ACCESSORIES),
    );
    catalog
}
