//=========================================================================
// Static Content
//=========================================================================
//
// Build-time species catalog and question bank for the activities.
//
// Both sequences are fixed, read-only configuration: the engines consume
// them and never mutate or validate beyond assuming non-empty,
// well-formed entries.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::deck::{Species, SpeciesId};
use crate::core::quiz::Question;

//=== Species Catalog =====================================================

/// Iconic fauna of the Antisana reserve used by the memory game.
const SPECIES: [Species; 8] = [
    Species {
        id: SpeciesId(1),
        name: "Cóndor Andino",
        image: "/juegos/especies/condor-andino.jpg",
    },
    Species {
        id: SpeciesId(2),
        name: "Oso de Anteojos",
        image: "/juegos/especies/oso-de-anteojos.jpg",
    },
    Species {
        id: SpeciesId(3),
        name: "Lobo de Páramo",
        image: "/juegos/especies/lobo-de-paramo.jpg",
    },
    Species {
        id: SpeciesId(4),
        name: "Venado de Cola Blanca",
        image: "/juegos/especies/venado-cola-blanca.jpg",
    },
    Species {
        id: SpeciesId(5),
        name: "Curiquingue",
        image: "/juegos/especies/curiquingue.jpg",
    },
    Species {
        id: SpeciesId(6),
        name: "Gaviota Andina",
        image: "/juegos/especies/gaviota-andina.jpg",
    },
    Species {
        id: SpeciesId(7),
        name: "Colibrí Estrella Ecuatoriana",
        image: "/juegos/especies/estrella-ecuatoriana.jpg",
    },
    Species {
        id: SpeciesId(8),
        name: "Tapir de Montaña",
        image: "/juegos/especies/tapir-de-montana.jpg",
    },
];

/// Returns the fixed species catalog.
pub fn species_catalog() -> Vec<Species> {
    SPECIES.to_vec()
}

//=== Question Bank =======================================================

/// Returns the fixed quiz question bank.
pub fn question_bank() -> Vec<Question> {
    vec![
        Question::new(
            "¿Qué es el páramo del Antisana?",
            &[
                "Un desierto de altura",
                "Una esponja natural que guarda y libera agua",
                "Un bosque tropical",
            ],
            1,
        ),
        Question::new(
            "¿Qué animales dependen del agua del páramo?",
            &[
                "El Oso de Anteojos y el Cóndor Andino",
                "Los pingüinos",
                "Los camellos",
            ],
            0,
        ),
        Question::new(
            "¿Qué miden las estaciones pluviométricas del proyecto?",
            &["La temperatura del mar", "La cantidad de lluvia", "El ruido"],
            1,
        ),
        Question::new(
            "¿Para qué sirven las predicciones de lluvia?",
            &[
                "Para adivinar la lotería",
                "Para decorar el mapa",
                "Para anticipar inundaciones y sequías",
            ],
            2,
        ),
        Question::new(
            "¿Cómo puedes ser un guardián del agua en casa?",
            &[
                "Dejando la llave abierta",
                "Cerrando la llave al cepillarte los dientes",
                "Regando la calle cada día",
            ],
            1,
        ),
        Question::new(
            "¿A dónde viaja el agua cuando el sol la calienta?",
            &["Sube al cielo como vapor", "Se esconde bajo tierra", "Desaparece"],
            0,
        ),
    ]
}

//=========================================================================
// Unit Tests
//=========================================================================
