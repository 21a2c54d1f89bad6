//! Fixed keyword vocabularies for the risk classifier.
//!
//! Any term from the drug set makes a message a candidate hit; terms in the
//! ambiguous subset can later be discarded by the job-context filter.

/// Drug-related terms and short phrases, Russian and English slang included.
pub const DRUG_KEYWORDS: &[&str] = &[
    // stash slang
    "закладка",
    "закладки",
    "клад",
    "кладмен",
    "закладчик",
    // mephedrone / amphetamine
    "меф",
    "мефедрон",
    "мефик",
    "мефчик",
    "мефушка",
    "спиды",
    "амф",
    "амфетамин",
    "фенамин",
    // salts / crystals
    "соль",
    "соли",
    "кристалл",
    "кристаллы",
    "кристал",
    "кристалы",
    // ecstasy / mdma
    "экстази",
    "мдма",
    "таблы",
    "таблетки счастья",
    // cannabis
    "шишки",
    "шишка",
    "гаш",
    "гашиш",
    "марихуана",
    "каннабис",
    "конопля",
    // lsd / blotters
    "лсд",
    "марки",
    "марка",
    // slang
    "белочка",
    // hard drugs
    "кокаин",
    "кокс",
    "героин",
    "гер",
    "опиум",
    "опиаты",
    // stimulants
    "метамфетамин",
    "a-pvp",
    "a-pvp кристаллы",
    "a-pvp мука",
    // euphorics
    "мефедрон кристаллы",
    "мефедрон кристаллическая пудра",
    "мефедрон мука",
    "мда",
    // cannabis goods
    "cannafood",
    "семена",
    "семя",
    // psychedelics
    "nbome",
    "2с",
    "2с-b",
    "2с-i",
    "2с-e",
    "2с-p",
    // pharmacy
    "антидепрессанты",
    "депрессанты",
    "диссоциативы",
    "нейролептики",
    "ноотропы",
    // english slang
    "ice",
    "айс",
    "mdma",
    "mda",
    "lsd",
    "acid",
    "weed",
    "hash",
    "hashish",
    "psy",
    "trip",
    "trips",
];

/// Drug terms with common legitimate usage. A message whose only drug hits
/// come from this set is dropped when it also reads like a job posting.
pub const AMBIGUOUS_DRUG_KEYWORDS: &[&str] = &[
    "закладка",
    "закладки",
    "семена",
    "семя",
    "марки",
    "марка",
    "ice",
    "айс",
];

/// Terms typical of employment postings. Matched as plain substrings,
/// one hit is enough to mark the job context.
pub const JOB_CONTEXT_KEYWORDS: &[&str] = &[
    "вакансия",
    "обязанности",
    "обязанность",
    "требования",
    "требуется",
    "зарплата",
    "зп",
    "kzt",
    "тенге",
    "тг",
    "оплата",
    "график работы",
    "график",
    "смены",
    "работа",
    "работать",
    "соц пакет",
    "соц. пакет",
    "оформление",
    "оформление по тк",
    "официальное трудоустройство",
    "трудовой отпуск",
    "столовая",
    "обед",
    "выходные",
    "рабочая неделя",
    "пятидневка",
    "сменный график",
    "полная занятость",
    "частичная занятость",
    "опыт работы",
    "без опыта",
    "контакты",
    "резюме",
    "email",
    "@gmail.com",
    "@mail.ru",
    "@yandex.ru",
];

/// Geographic terms, matched like drug keywords. Currently empty; city
/// lists can be added without touching the classifier.
pub const GEO_KEYWORDS: &[&str] = &[];

/// Synthetic trigger name appended when the geo signal fires.
pub const GEO_TRIGGER: &str = "kz_geo";

/// Phone number prefixes counted as in-country by the geo-ratio sampler.
pub const GEO_PHONE_PREFIXES: &[&str] = &["+77", "77"];
