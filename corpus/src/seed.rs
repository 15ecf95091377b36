//! Seed data baked into the binary.

use crate::language::LanguageCode;
use crate::record::IdiomRecord;

use LanguageCode::{De, En, It, Pt, Ru, Tr};

/// One row of the seed table: id, text, language, literal gloss, semantic
/// gloss, context, category.
type SeedRow = (
    &'static str,
    &'static str,
    LanguageCode,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

#[rustfmt::skip]
const SEED: &[SeedRow] = &[
    // English
    ("en-001", "Break a leg", En, "To break one's leg", "Good luck", "Theater", "encouragement"),
    ("en-002", "Bite the bullet", En, "Bite on a bullet", "Endure hardship", "Historical", "courage"),
    ("en-003", "Hit the nail on the head", En, "Strike nail directly", "Be exactly right", "Carpentry", "accuracy"),
    ("en-004", "Piece of cake", En, "Slice of cake", "Very easy", "Food", "ease"),
    ("en-005", "Spill the beans", En, "Spill beans", "Reveal secret", "Ancient Greece", "revelation"),
    ("en-006", "Raining cats and dogs", En, "Cats and dogs falling from sky", "Heavy rain", "Weather", "nature"),
    ("en-007", "Under the weather", En, "Below weather", "Feeling sick", "Health", "health"),
    ("en-008", "Burn the midnight oil", En, "Burn oil at midnight", "Work late", "Work", "effort"),
    ("en-009", "Call it a day", En, "Name it a day", "Stop working", "Work", "rest"),
    ("en-010", "Cut to the chase", En, "Cut to chase scene", "Get to the point", "Film", "directness"),
    ("en-011", "Beating around the bush", En, "Hit around bush", "Avoid the topic", "Nature", "avoidance"),
    ("en-012", "A piece of cake", En, "Piece of cake", "Easy task", "Food", "ease"),
    ("en-013", "Best of both worlds", En, "Best from two worlds", "Ideal situation", "Philosophy", "ideal"),
    ("en-014", "Blind as a bat", En, "Blind like a bat", "Cannot see", "Animals", "inability"),
    ("en-015", "Bright and early", En, "Bright and early", "Very early morning", "Time", "time"),
    ("en-016", "Butterflies in stomach", En, "Butterflies in stomach", "Nervous feeling", "Emotion", "emotion"),
    ("en-017", "Cry over spilled milk", En, "Cry over milk", "Regret past", "Food", "futility"),
    ("en-018", "Down to earth", En, "Down to earth", "Realistic person", "Nature", "personality"),
    ("en-019", "Draw the line", En, "Draw a line", "Set a limit", "Geometry", "boundary"),
    ("en-020", "Every dog has its day", En, "Every dog has a day", "Everyone gets a chance", "Animals", "fairness"),
    // German
    ("de-001", "Hals- und Beinbruch", De, "Neck and leg break", "Good luck", "German", "encouragement"),
    ("de-002", "Die Daumen drücken", De, "Press thumbs", "Keep fingers crossed", "Gesture", "encouragement"),
    ("de-003", "Ins Schwarze treffen", De, "Hit the black", "Hit bullseye", "Target", "accuracy"),
    ("de-004", "Ein Kinderspiel", De, "Child's play", "Very easy", "Game", "ease"),
    ("de-005", "Die Katze aus dem Sack lassen", De, "Let cat out of bag", "Reveal secret", "Market", "revelation"),
    ("de-006", "Tomaten auf den Augen haben", De, "Have tomatoes on eyes", "Not seeing obvious", "Food", "blindness"),
    ("de-007", "Mit Pauken und Trompeten", De, "With drums and trumpets", "With great fanfare", "Music", "emphasis"),
    ("de-008", "Kopf und Kragen riskieren", De, "Risk head and collar", "Risk everything", "Clothing", "risk"),
    ("de-009", "Jemanden über den Tisch ziehen", De, "Pull someone over table", "Cheat someone", "Table", "deception"),
    ("de-010", "Blau machen", De, "Make blue", "Skip work", "Color", "absence"),
    ("de-011", "Schmetterlinge im Bauch haben", De, "Have butterflies in belly", "Nervous excitement", "Emotion", "emotion"),
    ("de-012", "Das ist mir schnuppe", De, "That is me shoelace", "I don't care", "Clothing", "indifference"),
    ("de-013", "Auf der Leitung stehen", De, "Stand on the line", "Not understanding", "Communication", "confusion"),
    ("de-014", "Fersengeld geben", De, "Give heel money", "Run away", "Money", "escape"),
    ("de-015", "Jemandem einen Bären aufbinden", De, "Tie bear on someone", "Tell tall tale", "Animals", "deception"),
    ("de-016", "Sich in die Nesseln setzen", De, "Sit in nettles", "Get in trouble", "Nature", "trouble"),
    ("de-017", "Der Lackmus-Test", De, "The litmus test", "Decisive test", "Chemistry", "testing"),
    ("de-018", "Nicht alle Latten am Zaun haben", De, "Not all slats on fence", "Not very intelligent", "Building", "intelligence"),
    ("de-019", "Grüner Punkt", De, "Green dot", "Environmentally friendly", "Environment", "ecology"),
    ("de-020", "Ohr am Gleis haben", De, "Have ear on track", "Be informed", "Transport", "knowledge"),
    // Italian
    ("it-001", "In bocca al lupo", It, "Into wolf's mouth", "Good luck", "Animal", "encouragement"),
    ("it-002", "Mordere il freno", It, "Bite the bridle", "Show impatience", "Horse", "emotion"),
    ("it-003", "Colpire nel segno", It, "Hit the mark", "Be exactly right", "Target", "accuracy"),
    ("it-004", "È una passeggiata", It, "It's a walk", "Very easy", "Movement", "ease"),
    ("it-005", "Vuotare il sacco", It, "Empty the sack", "Reveal everything", "Container", "revelation"),
    ("it-006", "Andare al diavolo", It, "Go to the devil", "Go away", "Religion", "dismissal"),
    ("it-007", "Avere la testa fra le nuvole", It, "Have head in clouds", "Be distracted", "Nature", "distraction"),
    ("it-008", "Cadere dalle nuvole", It, "Fall from clouds", "Be surprised", "Weather", "surprise"),
    ("it-009", "Dare i numeri", It, "Give the numbers", "Act crazy", "Math", "behavior"),
    ("it-010", "Mangiare la foglia", It, "Eat the leaf", "Understand something", "Nature", "understanding"),
    ("it-011", "Non stare in gioco", It, "Not play the game", "Not participate", "Game", "participation"),
    ("it-012", "Prendere il volo", It, "Take flight", "Become successful", "Movement", "success"),
    ("it-013", "Restare senza fiato", It, "Stay without breath", "Be breathless", "Physiology", "amazement"),
    ("it-014", "Saltare di gioia", It, "Jump with joy", "Be very happy", "Emotion", "happiness"),
    ("it-015", "Scappare con la coda fra le gambe", It, "Run with tail between legs", "Run away defeated", "Animal", "defeat"),
    ("it-016", "Tenere a bada", It, "Keep at bay", "Keep away from", "Military", "control"),
    ("it-017", "Toccare il cielo con un dito", It, "Touch sky with finger", "Be supremely happy", "Religion", "happiness"),
    ("it-018", "Uscire di testa", It, "Exit from head", "Go mad", "Anatomy", "madness"),
    ("it-019", "Volare via", It, "Fly away", "Escape quickly", "Movement", "escape"),
    ("it-020", "Zitto come un pesce", It, "Silent as a fish", "Very quiet", "Animal", "silence"),
    // Portuguese
    ("pt-001", "Quebrar uma perna", Pt, "Break a leg", "Good luck", "Theater", "encouragement"),
    ("pt-002", "Morder a língua", Pt, "Bite tongue", "Hold back words", "Anatomy", "control"),
    ("pt-003", "Acertar na mosca", Pt, "Hit the fly", "Be exactly right", "Hunting", "accuracy"),
    ("pt-004", "Mamão com açúcar", Pt, "Papaya with sugar", "Very easy", "Food", "ease"),
    ("pt-005", "Abrir o jogo", Pt, "Open the game", "Be honest", "Card game", "honesty"),
    ("pt-006", "Bater na madeira", Pt, "Knock on wood", "For good luck", "Superstition", "luck"),
    ("pt-007", "Cair do cavalo", Pt, "Fall from horse", "Be very surprised", "Animal", "surprise"),
    ("pt-008", "Dar uma mãozinha", Pt, "Give a little hand", "Help a bit", "Anatomy", "help"),
    ("pt-009", "Estar com a cabeça nas nuvens", Pt, "Have head in clouds", "Be distracted", "Nature", "distraction"),
    ("pt-010", "Fazer tempestade em copo d'água", Pt, "Make storm in cup of water", "Make big deal of nothing", "Weather", "exaggeration"),
    ("pt-011", "Ganhar a vida", Pt, "Win life", "Make a living", "Life", "livelihood"),
    ("pt-012", "Hábito não faz monge", Pt, "Habit does not make monk", "Appearance is deceptive", "Religion", "deception"),
    ("pt-013", "Ir ao encontro", Pt, "Go to meeting", "Meet someone", "Movement", "meeting"),
    ("pt-014", "Jogo de cintura", Pt, "Waist game", "Diplomacy", "Anatomy", "diplomacy"),
    ("pt-015", "Levar um susto", Pt, "Take a scare", "Get frightened", "Emotion", "fear"),
    ("pt-016", "Meter a mão", Pt, "Put hand in", "Meddle", "Anatomy", "interference"),
    ("pt-017", "Não dar um pio", Pt, "Not say a peep", "Stay quiet", "Sound", "silence"),
    ("pt-018", "Olhar nos olhos", Pt, "Look in the eyes", "Face someone", "Anatomy", "confrontation"),
    ("pt-019", "Pagar justos pelos pecadores", Pt, "Pay just for sinners", "Be punished for others", "Religion", "injustice"),
    ("pt-020", "Quebra-galho", Pt, "Break branch", "Makeshift solution", "Nature", "solution"),
    // Russian
    ("ru-001", "Ни пуха ни пера", Ru, "Neither fluff nor feather", "Good luck", "Hunting", "encouragement"),
    ("ru-002", "Стиснуть зубы", Ru, "Clench teeth", "Endure hardship", "Anatomy", "courage"),
    ("ru-003", "Попасть в точку", Ru, "Hit the point", "Be exactly right", "Target", "accuracy"),
    ("ru-004", "Раз плюнуть", Ru, "One spit", "Very easy", "Action", "ease"),
    ("ru-005", "Выложить карты", Ru, "Lay out cards", "Reveal truth", "Game", "revelation"),
    ("ru-006", "Работать как лошадь", Ru, "Work like a horse", "Work very hard", "Animal", "effort"),
    ("ru-007", "Душа нараспашку", Ru, "Soul wide open", "Be very open", "Emotion", "openness"),
    ("ru-008", "Дело в шляпе", Ru, "Case in hat", "Everything is fine", "Clothing", "success"),
    ("ru-009", "Заводить романтику", Ru, "Start romance", "Flirt", "Emotion", "romance"),
    ("ru-010", "Зубом щёлкать", Ru, "Click teeth", "Be eager", "Anatomy", "eagerness"),
    ("ru-011", "Иголка в стоге сена", Ru, "Needle in haystack", "Impossible to find", "Farming", "difficulty"),
    ("ru-012", "Кровь с молоком", Ru, "Blood with milk", "Healthy appearance", "Food", "health"),
    ("ru-013", "Лёгкая рука", Ru, "Light hand", "Good luck", "Anatomy", "luck"),
    ("ru-014", "Мозговой штурм", Ru, "Brain storm", "Brainstorming", "Weather", "thinking"),
    ("ru-015", "Нервы шалят", Ru, "Nerves play up", "Be nervous", "Emotion", "emotion"),
    ("ru-016", "Открыть объятья", Ru, "Open arms", "Welcome warmly", "Anatomy", "welcome"),
    ("ru-017", "Палка о двух концах", Ru, "Stick with two ends", "Double-edged sword", "Tool", "duality"),
    ("ru-018", "Рассеянный взгляд", Ru, "Scattered look", "Absent-minded", "Emotion", "distraction"),
    ("ru-019", "Светлая голова", Ru, "Light head", "Be clever", "Anatomy", "intelligence"),
    ("ru-020", "Темная лошадка", Ru, "Dark horse", "Unknown quantity", "Animal", "mystery"),
    // Turkish
    ("tr-001", "Bol şans", Tr, "Abundant luck", "Good luck", "General", "encouragement"),
    ("tr-002", "Dişini sıkmak", Tr, "Clench teeth", "Endure difficulty", "Anatomy", "courage"),
    ("tr-003", "Tam isabet", Tr, "Direct hit", "Exactly right", "Military", "accuracy"),
    ("tr-004", "Çocuk oyuncağı", Tr, "Child's toy", "Very easy", "Game", "ease"),
    ("tr-005", "Sır vermek", Tr, "Give secret", "Reveal secret", "Secrecy", "revelation"),
    ("tr-006", "Saçını yolmak", Tr, "Pull out hair", "Be frustrated", "Anatomy", "frustration"),
    ("tr-007", "Şans yüzü gülmek", Tr, "Luck smiles", "Be lucky", "Emotion", "luck"),
    ("tr-008", "Ayakkabı değiştirmek", Tr, "Change shoes", "Put yourself in their place", "Clothing", "empathy"),
    ("tr-009", "Baş ağrısı olmak", Tr, "Be a headache", "Be troublesome", "Anatomy", "trouble"),
    ("tr-010", "Bardağı taşıran son damla", Tr, "Last drop overflowing", "Last straw", "Liquid", "limit"),
    ("tr-011", "Bir çıkmazda kalmak", Tr, "Be in dead end", "Be stuck", "Road", "difficulty"),
    ("tr-012", "Bir fincan kahvenin kırk yıl hatırı vardır", Tr, "Cup of coffee has 40 years memory", "Kindness is long remembered", "Food", "memory"),
    ("tr-013", "Boş ver", Tr, "Leave empty", "Never mind", "General", "dismissal"),
    ("tr-014", "Burnunun ucunu görmemek", Tr, "Not see nose tip", "Be blind to obvious", "Anatomy", "blindness"),
    ("tr-015", "Çamura saplanmış olmak", Tr, "Be stuck in mud", "Be in trouble", "Nature", "trouble"),
    ("tr-016", "Çıt çıkarmamak", Tr, "Make no sound", "Keep quiet", "Sound", "silence"),
    ("tr-017", "Değerli taş", Tr, "Precious stone", "Valuable person", "Mineral", "value"),
    ("tr-018", "Düş görmek", Tr, "See dream", "Have ambition", "Sleep", "dreams"),
    ("tr-019", "Fikrinin ucundan geçmemek", Tr, "Not cross mind tip", "Never occur to", "Thought", "ignorance"),
    ("tr-020", "Gözü kara", Tr, "Dark eye", "Determined", "Anatomy", "determination"),
];

/// Build every seed record, in table order.
pub(crate) fn seed_records() -> Vec<IdiomRecord> {
    SEED.iter()
        .map(|&(id, text, language, literal, semantic, context, category)| {
            IdiomRecord::new(id, text, language, literal, semantic, context, category)
        })
        .collect()
}
