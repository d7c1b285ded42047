//! Built-in lexicon sources: literal starter levels, raw-text exam lists,
//! and the graded JSON vocabularies.

/// Name of the kindergarten/primary high-frequency level.
pub const KINDERGARTEN: &str = "lexicon_kindergarten";
pub const KINDERGARTEN_DESCRIPTION: &str = "幼儿园/小学高频词";

/// A word shipped with the binary.
#[derive(Debug, Clone, Copy)]
pub struct LocalWord {
    pub text: &'static str,
    pub translation: &'static str,
    pub part_of_speech: Option<&'static str>,
    pub example: Option<&'static str>,
}

const fn word(text: &'static str, translation: &'static str) -> LocalWord {
    LocalWord {
        text,
        translation,
        part_of_speech: None,
        example: None,
    }
}

/// A phrase shipped with the binary.
#[derive(Debug, Clone, Copy)]
pub struct LocalPhrase {
    pub text: &'static str,
    pub translation: &'static str,
    pub examples: &'static [&'static str],
}

/// A level whose words are literals.
#[derive(Debug, Clone, Copy)]
pub struct LocalLevel {
    pub name: &'static str,
    pub description: &'static str,
    pub words: &'static [LocalWord],
    pub phrases: &'static [LocalPhrase],
}

/// A level fetched as a plain-text word list.
#[derive(Debug, Clone, Copy)]
pub struct RemoteLevel {
    pub name: &'static str,
    pub description: &'static str,
    pub url: &'static str,
}

pub const LOCAL_LEVELS: &[LocalLevel] = &[
    LocalLevel {
        name: "default",
        description: "示例词库，包含基础单词与短语",
        words: &[
            LocalWord {
                text: "apple",
                translation: "苹果",
                part_of_speech: Some("n."),
                example: Some("I eat an apple every morning."),
            },
            LocalWord {
                text: "persist",
                translation: "坚持，持续",
                part_of_speech: Some("v."),
                example: Some("You must persist in practicing English every day."),
            },
        ],
        phrases: &[LocalPhrase {
            text: "by heart",
            translation: "熟记于心",
            examples: &["You should learn the new words by heart."],
        }],
    },
    LocalLevel {
        name: KINDERGARTEN,
        description: "幼儿园基础词",
        words: &[
            word("apple", "苹果"),
            word("dog", "狗"),
            word("cat", "猫"),
            word("ball", "球"),
            word("run", "跑"),
            word("jump", "跳"),
            word("red", "红色"),
            word("blue", "蓝色"),
            word("mom", "妈妈"),
            word("dad", "爸爸"),
            word("book", "书"),
            word("happy", "开心"),
            word("sad", "难过"),
            word("hot", "热"),
            word("cold", "冷"),
        ],
        phrases: &[],
    },
    LocalLevel {
        name: "lexicon_elementary",
        description: "小学常见词",
        words: &[
            word("school", "学校"),
            word("teacher", "老师"),
            word("friend", "朋友"),
            word("study", "学习"),
            word("learn", "学习"),
            word("breakfast", "早餐"),
            word("lunch", "午餐"),
            word("homework", "作业"),
            word("family", "家庭"),
            word("music", "音乐"),
            word("library", "图书馆"),
            word("computer", "电脑"),
            word("playground", "操场"),
            word("river", "河流"),
            word("mountain", "山"),
        ],
        phrases: &[],
    },
];

pub const REMOTE_LEVELS: &[RemoteLevel] = &[
    RemoteLevel {
        name: "lexicon_middle",
        description: "初中进阶（SAT 起步）",
        url: "https://raw.githubusercontent.com/teropa/nlp/master/resources/vocabulary/sat.txt",
    },
    RemoteLevel {
        name: "lexicon_high",
        description: "高中强化（SAT 核心）",
        url: "https://raw.githubusercontent.com/teropa/nlp/master/resources/vocabulary/sat.txt",
    },
    RemoteLevel {
        name: "lexicon_college",
        description: "大学/考研（GRE 核心）",
        url: "https://raw.githubusercontent.com/teropa/nlp/master/resources/vocabulary/gre.txt",
    },
];

/// Graded JSON vocabularies from KyleBing/english-vocabulary.
pub const GRADED_LEVELS: &[RemoteLevel] = &[
    RemoteLevel {
        name: "lexicon_junior",
        description: "初中词汇（KyleBing english-vocabulary）",
        url: "https://raw.githubusercontent.com/KyleBing/english-vocabulary/master/json/1-初中-顺序.json",
    },
    RemoteLevel {
        name: "lexicon_senior",
        description: "高中词汇（KyleBing english-vocabulary）",
        url: "https://raw.githubusercontent.com/KyleBing/english-vocabulary/master/json/2-高中-顺序.json",
    },
    RemoteLevel {
        name: "lexicon_cet4",
        description: "CET-4 词汇（KyleBing english-vocabulary）",
        url: "https://raw.githubusercontent.com/KyleBing/english-vocabulary/master/json/3-CET4-顺序.json",
    },
    RemoteLevel {
        name: "lexicon_cet6",
        description: "CET-6 词汇（KyleBing english-vocabulary）",
        url: "https://raw.githubusercontent.com/KyleBing/english-vocabulary/master/json/4-CET6-顺序.json",
    },
    RemoteLevel {
        name: "lexicon_postgrad",
        description: "考研词汇（KyleBing english-vocabulary）",
        url: "https://raw.githubusercontent.com/KyleBing/english-vocabulary/master/json/5-考研-顺序.json",
    },
    RemoteLevel {
        name: "lexicon_toefl",
        description: "托福词汇（KyleBing english-vocabulary）",
        url: "https://raw.githubusercontent.com/KyleBing/english-vocabulary/master/json/6-托福-顺序.json",
    },
    RemoteLevel {
        name: "lexicon_sat_kb",
        description: "SAT 词汇（KyleBing english-vocabulary）",
        url: "https://raw.githubusercontent.com/KyleBing/english-vocabulary/master/json/7-SAT-顺序.json",
    },
];
