//! Built-in example phrases (Chinese and English).

use super::{Category, TaxonomyCatalog};
use crate::types::Taxonomy;

const INTENTS: &[(&str, &[&str])] = &[
    (
        "create_todo",
        &[
            "添加一个待办",
            "创建任务",
            "新增todo",
            "建立待办事项",
            "create a todo",
            "add a task",
            "new todo",
            "create a to-do",
            "add a to-do",
        ],
    ),
    (
        "create_note",
        &[
            "创建一篇笔记",
            "新建页面",
            "创建note",
            "create a note",
            "add a new page",
        ],
    ),
    (
        "role_play",
        &[
            "请扮演一名 …",
            "假设你是 …",
            "充当 … 的角色",
            "act as …",
            "pretend to be …",
            "you are …",
            "roleplay …",
        ],
    ),
    (
        "brainstorm",
        &[
            "帮我头脑风暴一下",
            "生成一些灵感",
            "想法清单",
            "brainstorm ideas",
            "give me some inspiration",
            "list ideas",
        ],
    ),
    (
        "story_write",
        &[
            "写一个故事",
            "创作一个短篇",
            "生成剧情",
            "write a story",
            "create a story",
            "generate a plot",
        ],
    ),
    (
        "summary",
        &[
            "请总结这篇笔记",
            "生成摘要",
            "提炼要点",
            "summarize this note",
            "give me a summary",
        ],
    ),
    (
        "rewrite",
        &[
            "帮我润色这段文字",
            "优化表达",
            "改写得更自然",
            "rewrite this text",
            "polish the paragraph",
        ],
    ),
    (
        "translate",
        &[
            "翻译成英文",
            "翻译成中文",
            "translate to English",
            "translate to Chinese",
        ],
    ),
    (
        "idea_generate",
        &[
            "生成一些想法",
            "给我几个主题方向",
            "头脑风暴新点子",
            "give me ideas",
            "generate creative directions",
        ],
    ),
    (
        "character_build",
        &[
            "创建人物设定",
            "帮我设计角色背景",
            "角色档案",
            "create a character",
            "build a persona",
            "character background",
        ],
    ),
];

const ACTIONS: &[(&str, &[&str])] = &[
    ("confirm", &["确认", "好的", "就这样", "ok", "yes", "go ahead"]),
    (
        "cancel",
        &["取消", "算了", "先不要", "别", "no", "stop", "cancel"],
    ),
    (
        "amend",
        &["改成明天", "改标题为…", "优先级设高", "status 改成进行中"],
    ),
    ("clarify", &["明天", "高优先", "标题叫…"]),
    ("select", &["选第一个", "第二个", "就是‘跑步’那条"]),
];

fn build(taxonomy: Taxonomy, data: &[(&str, &[&str])]) -> TaxonomyCatalog {
    // Validated by `tables_pass_validation`.
    let categories = data
        .iter()
        .map(|(name, examples)| Category {
            name: (*name).to_string(),
            examples: examples.iter().map(|e| (*e).to_string()).collect(),
        })
        .collect();
    TaxonomyCatalog {
        taxonomy,
        categories,
    }
}

pub(super) fn intents() -> TaxonomyCatalog {
    build(Taxonomy::Intent, INTENTS)
}

pub(super) fn actions() -> TaxonomyCatalog {
    build(Taxonomy::Action, ACTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_pass_validation() {
        for (taxonomy, data) in [(Taxonomy::Intent, INTENTS), (Taxonomy::Action, ACTIONS)] {
            let validated = TaxonomyCatalog::from_pairs(taxonomy, data.iter().copied()).unwrap();
            assert_eq!(validated, build(taxonomy, data));
        }
    }
}
