use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::generator::TextSource;

const PASSAGES: &[&str] = &[
    "the lighthouse keeper climbed the narrow stairs every evening to light the lamp before the fishing boats came home",
    "a cold wind moved through the market square and the traders pulled their coats tight while they packed away the fruit",
    "she kept a small notebook in her pocket and wrote down every bird she saw on the long walk to the station",
    "the train was late again so the passengers stood on the platform and watched the snow settle on the empty tracks",
    "after the storm the village children ran down to the beach to collect the shells and driftwood left by the waves",
    "he fixed the old radio with a borrowed screwdriver and a piece of copper wire and it played music for the first time in years",
    "the library stayed open late on thursdays and the reading room filled with students who spoke only in whispers",
    "morning fog covered the valley so completely that the farmhouse on the hill seemed to float above a grey sea",
    "every summer the family drove north to the lake where they rented the same wooden cabin with the green door",
    "the baker started work before dawn and by six the whole street smelled of warm bread and burnt sugar",
    "they argued for an hour about the best route over the pass and in the end they simply followed the river",
    "the museum guard had walked past the same painting for thirty years and still found something new in it each week",
    "when the power failed the whole building went quiet and the neighbours gathered in the hall with candles and stories",
    "the gardener planted rows of beans and tomatoes and waited patiently for the first green shoots to break the soil",
    "a small boat drifted across the harbour with its sail hanging loose and nobody on deck to steer it",
    "the old clock in the hallway ran ten minutes fast but nobody in the house ever thought to correct it",
    "she learned to play the piano from a book of simple songs and practised every night after the dishes were done",
    "the mountain road turned sharply at every bend and the bus driver sounded his horn before each blind corner",
    "at the end of the day the workers sat on the wall outside the factory and watched the sun go down over the canal",
    "the letter arrived three weeks late with a foreign stamp and a name on the envelope that nobody recognised",
    "rain drummed on the tin roof of the shed while the dog slept by the stove and the kettle began to sing",
    "the map was old and torn at the folds but it still showed the path through the forest to the abandoned mill",
    "he counted the steps from the gate to the front door and there were exactly forty two every single time",
    "the city never really slept and even at three in the morning there were taxis waiting outside the station",
];

/// Picks random built-in passages and trims them to the requested length.
pub struct PassageSource {
    rng: SmallRng,
}

impl PassageSource {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }

    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }

    fn random_passage(&mut self) -> &'static str {
        PASSAGES[self.rng.gen_range(0..PASSAGES.len())]
    }
}

impl TextSource for PassageSource {
    fn next_text(&mut self, word_count: usize) -> String {
        let word_count = word_count.max(1);
        let mut words: Vec<&str> = Vec::with_capacity(word_count);
        while words.len() < word_count {
            words.extend(self.random_passage().split_whitespace());
        }
        words.truncate(word_count);
        words.join(" ")
    }
}

/// Used when a custom prompt turns out to be unusable.
pub fn fallback_text() -> &'static str {
    PASSAGES[0]
}
