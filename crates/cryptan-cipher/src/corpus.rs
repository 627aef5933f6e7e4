//! English corpus and dictionary
//!
//! A handful of plain English passages compiled into the binary. They are
//! the plaintext source for generated samples and the training text for
//! language statistics.
//!
//! The English dictionary combines an embedded list of common words, ranked
//! by frequency, with every word of the passages.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref WORD_PATTERN: Regex = Regex::new(r"[A-Za-z]+").unwrap();
    static ref ENGLISH_DICTIONARY: Dictionary =
        Dictionary::from_text(&corpus_text()).with_word_list(ENGLISH_WORDS);
}

/// `word<TAB>count` lines, most frequent first
const ENGLISH_WORDS: &str = include_str!("english_words.txt");

/// Plaintext passages; every one is long enough for period estimation
pub const PASSAGES: &[&str] = &[
    "The harbor town woke slowly on the morning of the market. Fishermen who had \
     been out since midnight tied their boats to the wooden posts and carried \
     baskets of silver fish up the narrow stairs to the square. The baker had \
     already opened his shutters, and the smell of warm bread drifted along the \
     street where the children waited for the school bell. Old women sat on the \
     benches near the fountain and talked about the weather, the price of salt, \
     and the new schoolmaster who had arrived from the city with a trunk full of books. \
     Nobody in the town had seen so many books in one place before. The schoolmaster \
     was a quiet man with round glasses, and he spent his first week walking from \
     house to house, asking each family whether their children could read. Most \
     of the parents were polite but doubtful. They needed the older boys on the \
     boats and the older girls in the kitchens, and they did not understand what \
     a boy would gain from reading about the kings of distant countries. The \
     schoolmaster listened to all of them without arguing. On the following Sunday he \
     opened the doors of the old customs house, set out chairs in long rows, and \
     began to read aloud from a story about a sailor who was lost at sea for seven \
     years. By the end of the afternoon the room was full, and people were \
     standing in the doorway to hear what happened next. When the sun went down he \
     closed the book at the most exciting moment and told them he would continue \
     the following week. That was how the school in the harbor town really began, \
     not with a law or a letter from the government, but with a story that nobody \
     wanted to leave unfinished.",
    "Every winter the river froze from one bank to the other, and for nearly two \
     months the valley was cut off from the rest of the world. The farmers prepared \
     for this season all through the autumn. They dried apples and plums on racks \
     in the sun, they salted meat and packed it in barrels, and they stacked \
     firewood against the walls of their houses until the windows on the north \
     side were completely covered. The mill ran day and night in the last weeks \
     before the frost, grinding the grain that would feed the valley until the \
     spring. When the ice finally came it arrived in a single night. People went \
     to sleep listening to the water and woke up to a silence so complete that \
     they could hear the snow settling on the roofs. The young men tested the ice \
     with long poles and heavy boots, and when they were certain it would hold, \
     the whole village walked down to the river to celebrate. There were fires on \
     the bank, hot wine in copper pots, and races across the ice that always ended \
     with somebody falling and everybody laughing. For the rest of the winter the \
     frozen river became a road. Sleds carried wood and flour between the farms, \
     and the doctor could reach the far side of the valley in an hour instead of \
     a day. The old people said that the valley was never as united as it was in \
     the cold months, when every family depended on its neighbors and nobody could \
     afford to hold a grudge. When the thaw came in March and the ice broke with a \
     sound like distant thunder, there was always a little sadness mixed with the \
     relief.",
    "A good map is a kind of argument. It claims that some things matter more \
     than others, that a road deserves a thick red line while a footpath gets a \
     faint dotted one, and that the name of a city should be printed in larger \
     letters than the name of a village. The people who draw maps make hundreds of \
     these decisions, and most readers never notice them. We tend to trust a map \
     in the same way that we trust a clock, as if it were simply reporting the \
     truth. Yet two maps of the same region can tell very different stories. One \
     may show the mountains and rivers in great detail and leave out the borders \
     entirely. Another may show nothing but borders, colored in bright blocks, as \
     if the land itself were only a background for the lines drawn across it. \
     Early sailors relied on charts that marked the depth of the water and the \
     position of rocks near the coast, because those were the facts that could \
     sink a ship. The interior of the continent was often left blank or filled \
     with decorations, since no captain needed to know what lay a hundred miles \
     inland. Modern maps on our phones are different again. They change depending \
     on who is looking at them and where that person wants to go. A restaurant \
     appears when we are hungry and disappears when we are not. This is useful, \
     but it also means that each of us carries a private picture of the world, \
     shaped by our habits and our searches. It is worth remembering, now and then, \
     that the map is not the territory, and that every map was made by someone \
     with a purpose.",
    "The laboratory on the third floor had been built for chemistry, but by the \
     time the new director arrived it was full of computers. Cables ran along the \
     old gas pipes, and the fume cupboards were used to store paper and spare \
     keyboards. The director was a patient woman who believed that the best \
     experiments were the simple ones. She asked her students to write down their \
     predictions before they ran any test, and she made them explain, in plain \
     words, what result would prove them wrong. Many of them found this harder \
     than the experiments themselves. It is easy to collect data and then look \
     for a pattern that seems interesting. It is much harder to commit in advance \
     to a clear question and accept the answer even when it is disappointing. In \
     her first year the group published fewer papers than before, and some people \
     in the department began to complain. In the second year the papers that did \
     appear were cited again and again, because other scientists found that the \
     results could be repeated. The director kept a notebook on her desk in which \
     she recorded every failed experiment along with the reason it had failed. \
     She said that this notebook was the most valuable thing in the building. When \
     a student became discouraged she would open it to a random page and read \
     aloud about a mistake she had made twenty years earlier, which usually made \
     the student laugh and feel a little better. Over time the notebook became a \
     kind of history of the group, and new members were encouraged to read it \
     before they touched any equipment.",
    "Gardening teaches patience in a way that few other activities can. You can \
     prepare the soil, choose the seeds carefully, and water them every evening, \
     but in the end the plants grow at their own speed and there is nothing you \
     can do to hurry them. The first green shoots appear when they are ready and \
     not a day before. Experienced gardeners learn to read small signs. They know \
     that yellow leaves may mean too much water, that curled leaves may mean too \
     little, and that a sudden crowd of ants on the stems usually means that tiny \
     insects are feeding on the sap. They also learn that a garden is never really \
     finished. Every season brings new problems and new opportunities. A tree that \
     gave shade for years may fall in a storm and suddenly flood a corner with \
     sunlight, and the flowers that once struggled there begin to thrive. Weeds \
     return no matter how often they are pulled, and after a while most gardeners \
     make a kind of peace with them, removing the worst and tolerating the rest. \
     There is also the pleasure of sharing. A single tomato plant can produce far \
     more fruit than one family can eat, and by the end of the summer neighbors \
     find bags of tomatoes, beans, and squash left on their doorsteps. Seeds are \
     saved and passed from hand to hand, sometimes for generations, so that a \
     variety of bean grown in one small village may end up on the other side of \
     the world. In this sense every garden is connected to thousands of others, \
     through the people who tended them and the seeds they chose to keep.",
    "The train left the station exactly on time, which surprised everyone on the \
     platform, since it had been late every day for the past month. Inside the \
     second carriage a young woman settled into her seat by the window and opened \
     a letter she had been carrying for three days without reading. It was from \
     her grandfather, who lived alone in a stone house at the end of the line, and \
     it was written in the careful, slanted handwriting that she remembered from \
     the birthday cards of her childhood. He wrote that the roof had started to \
     leak again, that the cat had caught two mice and left them on the kitchen \
     table as a gift, and that he had finally decided to sell the orchard. He did \
     not ask her to come home. He only said that the trees would be cut down in \
     the spring unless somebody in the family wanted them, and that he would \
     understand if nobody did. She read the letter twice and then looked out at \
     the fields rolling past the window. She thought about the summers she had \
     spent climbing those trees, about the smell of crushed apples in the cellar, \
     and about the long evenings when her grandfather had taught her the names \
     of the stars. By the time the train reached the coast she had made up her \
     mind. She would not sell her small flat in the city, and she would not give \
     up her work, but she would spend every weekend in the orchard until she had \
     learned how to care for it. When she stepped off the train at the last \
     station her grandfather was waiting under the clock, holding an umbrella \
     even though the sky was perfectly clear.",
    "Bridges are among the oldest and most admired works of engineering. The \
     earliest were probably nothing more than fallen trees across a stream, but \
     over thousands of years people learned to build them from stone, iron, steel, \
     and concrete, and to make them longer, lighter, and stronger. Every bridge \
     must solve the same basic problem. It has to carry its own weight and the \
     weight of everything that crosses it, and it has to send those forces safely \
     down into the ground. An arch does this by pushing outward against its ends, \
     which is why stone arches need heavy supports on both banks. A suspension \
     bridge hangs its road from cables that pass over tall towers and are anchored \
     in massive blocks of concrete at each end. A beam bridge is the simplest of \
     all, a rigid span resting on piers, and it is still the most common type on \
     ordinary roads. Engineers must also think about forces that are harder to \
     see. Wind can make a long bridge twist and sway, and there is a famous case \
     of a bridge that shook itself apart in a moderate breeze only a few months \
     after it opened. Temperature changes cause steel to expand and contract, so \
     most large bridges include joints that allow the deck to move a little \
     without cracking. Even the rhythm of marching soldiers was once considered \
     dangerous, and troops were ordered to break step when crossing. Today \
     computer models help designers test their ideas long before construction \
     begins, but the best engineers still visit their bridges in person, walking \
     across them and listening to how they respond.",
    "The library closed at nine, but the night guard had a habit of leaving the \
     reading room lights on for an extra hour. He said it was to check the \
     windows, though everyone knew he spent the time reading. He had started with \
     the newspapers, then moved on to the travel books, and by his third year he \
     was working his way through the history section shelf by shelf. He took \
     notes in a small brown notebook and kept a list of questions that the books \
     did not answer. Why had the old city walls been torn down? What happened to \
     the family who built the library and then disappeared from every record? \
     Who had written the strange comments in pencil in the margins of the oldest \
     atlas? The librarians noticed his interest and began to leave articles on \
     his desk that they thought he might enjoy. One of them showed him how to \
     search the archive in the basement, where the letters and account books of \
     the founding family were stored in cardboard boxes. Over the next winter he \
     read every letter. He discovered that the family had lost its fortune in a \
     single season of bad investments and had quietly moved abroad to avoid \
     their debts, leaving the library as the only evidence that they had ever \
     been rich. He wrote a short account of what he had found and gave it to the \
     head librarian, who read it in one sitting. A month later it was printed in \
     the local paper, and the guard found himself invited to give a talk in the \
     same reading room where he had spent so many quiet evenings. He was nervous, \
     but the room was full, and afterward several people asked him to sign their \
     copies.",
];

/// Every passage joined into one training text
pub fn corpus_text() -> String {
    PASSAGES.join("\n\n")
}

/// A dictionary entry: a lowercase word and its relative frequency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictWord {
    pub word: String,
    pub count: usize,
}

/// Words ranked by frequency
pub struct Dictionary {
    words: Vec<DictWord>,
    index: HashMap<String, usize>,
}

impl Dictionary {
    /// Common English words plus the words of the embedded passages
    pub fn english() -> &'static Dictionary {
        &ENGLISH_DICTIONARY
    }

    /// Count every alphabetic word in `text`, case-insensitively
    pub fn from_text(text: &str) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for m in WORD_PATTERN.find_iter(text) {
            *counts.entry(m.as_str().to_lowercase()).or_insert(0) += 1;
        }
        Self::from_counts(counts)
    }

    /// Add the entries of a `word<TAB>count` list. A missing count means 1;
    /// blank lines, `#` comments and entries that are not a single
    /// alphabetic word are skipped. Counts of repeated words add up.
    pub fn with_word_list(self, list: &str) -> Self {
        let mut counts: HashMap<String, usize> =
            self.words.into_iter().map(|w| (w.word, w.count)).collect();
        for (word, count) in list.lines().filter_map(parse_entry) {
            *counts.entry(word.to_lowercase()).or_insert(0) += count;
        }
        Self::from_counts(counts)
    }

    fn from_counts(counts: HashMap<String, usize>) -> Self {
        let mut words: Vec<DictWord> = counts
            .into_iter()
            .map(|(word, count)| DictWord { word, count })
            .collect();
        // Most frequent first, alphabetical among equals so indices are stable
        words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));

        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.word.clone(), i))
            .collect();

        Self { words, index }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at rank `idx` (0 is the most frequent)
    pub fn get(&self, idx: usize) -> Option<&DictWord> {
        self.words.get(idx)
    }

    /// Entries from most to least frequent
    pub fn iter(&self) -> impl Iterator<Item = &DictWord> {
        self.words.iter()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(&word.to_lowercase())
    }

    /// Fraction of the letters in `text` that belong to dictionary words
    pub fn coverage(&self, text: &[u8]) -> f64 {
        let text = String::from_utf8_lossy(text);
        let mut total = 0usize;
        let mut known = 0usize;
        for m in WORD_PATTERN.find_iter(&text) {
            let len = m.as_str().len();
            total += len;
            if self.contains(m.as_str()) {
                known += len;
            }
        }
        if total == 0 {
            0.0
        } else {
            known as f64 / total as f64
        }
    }
}

fn parse_entry(line: &str) -> Option<(&str, usize)> {
    let line = line.trim();
    if line.starts_with('#') {
        return None;
    }
    let mut fields = line.split_whitespace();
    let word = fields.next()?;
    let count = match fields.next() {
        Some(count) => count.parse().ok()?,
        None => 1,
    };
    if fields.next().is_some() || !word.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    Some((word, count))
}
