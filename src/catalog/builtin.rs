use crate::record::Record;

const IMAGE_BASE: &str = "https://raw.githubusercontent.com/jamesmontemagno/app-monkeys/master";

fn entry(
    name: &str,
    species: &str,
    location: &str,
    population: u32,
    description: &str,
    image: &str,
) -> Record {
    Record {
        name: name.to_string(),
        species: species.to_string(),
        location: location.to_string(),
        population,
        description: description.to_string(),
        image_url: format!("{IMAGE_BASE}/{image}"),
        coordinates: None,
    }
}

/// The bundled dataset, in declaration order.
pub fn builtin_records() -> Vec<Record> {
    vec![
        entry(
            "Baboon",
            "Papio",
            "Africa & Arabia",
            100_000,
            "Baboons are some of the world's largest monkeys, known for their distinctive elongated muzzle.",
            "Baboon.jpg",
        ),
        entry(
            "Capuchin",
            "Cebus",
            "Central & South America",
            23_000,
            "The capuchin monkeys are the most intelligent New World monkeys.",
            "Capuchin.jpg",
        ),
        entry(
            "Red-shanked Douc",
            "Pygathrix nemaeus",
            "Vietnam",
            1_000,
            "The red-shanked douc is a species of Old World monkey, one of the most colorful primates.",
            "Golden-Headed_Lion_Tamarin.jpg",
        ),
        entry(
            "Japanese Macaque",
            "Macaca fuscata",
            "Japan",
            100_000,
            "The Japanese macaque, also known as the snow monkey, is a terrestrial Old World monkey species.",
            "Japanese_Macaque.jpg",
        ),
        entry(
            "Mandrill",
            "Mandrillus sphinx",
            "Central Africa",
            4_000,
            "The mandrill is one of the most colorful mammals in the world, with red and blue facial markings.",
            "Mandrill.jpg",
        ),
        entry(
            "Proboscis Monkey",
            "Nasalis larvatus",
            "Borneo",
            7_000,
            "The proboscis monkey is known for its unusually large nose, which can exceed 10 cm in length.",
            "Proboscis_Monkey.jpg",
        ),
        entry(
            "Spider Monkey",
            "Ateles",
            "Central & South America",
            25_000,
            "Spider monkeys are New World monkeys known for their extremely long limbs and prehensile tails.",
            "Spider_Monkey.jpg",
        ),
        entry(
            "Squirrel Monkey",
            "Saimiri",
            "Central & South America",
            100_000,
            "Squirrel monkeys are small New World monkeys, known for their distinctive coloring and active nature.",
            "Squirrel_Monkey.jpg",
        ),
        entry(
            "Howler Monkey",
            "Alouatta",
            "Central & South America",
            15_000,
            "Howler monkeys are among the largest New World monkeys and are famous for their loud howls.",
            "Howler_Monkey.jpg",
        ),
        entry(
            "Golden Lion Tamarin",
            "Leontopithecus rosalia",
            "Brazil",
            3_200,
            "The golden lion tamarin is a small New World monkey with striking reddish-orange pelage.",
            "Golden-Headed_Lion_Tamarin.jpg",
        ),
    ]
}
