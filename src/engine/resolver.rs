//! 答案推断引擎
//!
//! 根据挑战类型选择推断策略：
//!
//! | 策略 | 挑战类型 | 验证参数 | 结果 |
//! |---|---|---|---|
//! | `SingleChoice` | 1 | 每个选项各一次，无附加参数 | 下方选项序号 |
//! | `Strength` | 2, 5 | 下方每个标识作为 `isIncrease` | 下方选项序号 |
//! | `StrengthWithBand` | 3, 4 | 上方标识作为 `isIncrease`，下方标识作为 `affectValue` | (上方序号, 下方序号) |

use std::time::Duration;

use tracing::{debug, info};

use crate::clients::{Modifiers, Oracle, Probe};
use crate::engine::race::first_positive;
use crate::error::{NetworkError, ResolveError};
use crate::models::{Choice, ChoiceField, Question, Test, TestType};
use crate::page::{ChoiceBox, PageState};
use crate::services::ChoiceTagMapper;

/// 推断结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// 单个答案的选项序号
    Single(usize),
    /// 强弱 + 频带两个答案
    Pair { strength: usize, band: usize },
}

/// 推断策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    SingleChoice,
    Strength,
    StrengthWithBand,
}

impl Strategy {
    pub fn for_type(test_type: TestType) -> Self {
        match test_type {
            TestType::SingleChoice => Strategy::SingleChoice,
            TestType::BinaryStrength(_) => Strategy::Strength,
            TestType::BandWithPair | TestType::BandWithSingle => Strategy::StrengthWithBand,
        }
    }
}

/// 单题推断所需的只读上下文
struct ResolveCtx<'a> {
    test_id: &'a str,
    test_type: TestType,
    test: &'a Test,
    question: &'a Question,
    current_music_id: &'a str,
    mapper: ChoiceTagMapper<'a>,
}

/// 答案推断引擎
pub struct AnswerEngine<'o, O: Oracle + ?Sized> {
    oracle: &'o O,
    resolve_timeout: Duration,
}

impl<'o, O: Oracle + ?Sized> AnswerEngine<'o, O> {
    pub fn new(oracle: &'o O, resolve_timeout: Duration) -> Self {
        Self {
            oracle,
            resolve_timeout,
        }
    }

    /// 推断快照中当前题目的答案
    pub async fn resolve(&self, test: &Test, state: &PageState) -> Result<Answer, ResolveError> {
        let index = state.question_index;
        let question = test.question(index).ok_or(ResolveError::QuestionOutOfRange {
            index,
            count: test.len(),
        })?;

        let ctx = ResolveCtx {
            test_id: &state.test_id,
            test_type: state.test_type,
            test,
            question,
            current_music_id: &state.current_music_id,
            mapper: ChoiceTagMapper::new(state),
        };

        let strategy = Strategy::for_type(state.test_type);
        debug!("第 {} 题使用 {:?} 策略", index + 1, strategy);

        let answer = match strategy {
            Strategy::SingleChoice => Answer::Single(self.single_choice(&ctx).await?),
            Strategy::Strength => Answer::Single(self.strength(&ctx, ChoiceBox::Lower).await?),
            Strategy::StrengthWithBand => {
                let (strength, band) =
                    tokio::try_join!(self.strength(&ctx, ChoiceBox::Upper), self.band(&ctx))?;
                Answer::Pair { strength, band }
            }
        };

        info!("第 {} 题答案: {:?}", index + 1, answer);
        Ok(answer)
    }

    /// 三选一：逐个验证题目中的选项，再把正确选项映射回页面序号
    async fn single_choice(&self, ctx: &ResolveCtx<'_>) -> Result<usize, ResolveError> {
        let oracle = self.oracle;
        let probes = ctx
            .question
            .choices
            .iter()
            .map(move |choice| async move {
                oracle
                    .verify(&Probe {
                        test_id: ctx.test_id,
                        test_type: ctx.test_type,
                        examine_id: &ctx.question.examine_id,
                        timestamp: &ctx.question.timestamp,
                        choice,
                        modifiers: Modifiers::none(),
                    })
                    .await
            })
            .collect();

        let winner = first_positive("single", probes, self.resolve_timeout).await?;
        let filename = ctx.question.choices[winner].file_name();

        let remote_id = ctx
            .mapper
            .remote_id_for(filename)
            .ok_or_else(|| ResolveError::lookup_miss(format!("页面上没有音频文件 {}", filename)))?;

        ctx.mapper
            .ui_index_for(remote_id, ChoiceBox::Lower)
            .ok_or_else(|| ResolveError::lookup_miss(format!("下方选项中没有标识 {}", remote_id)))
    }

    /// 强弱判断：以选项区域中的每个标识作为 `isIncrease` 验证当前音频
    async fn strength(&self, ctx: &ResolveCtx<'_>, choice_box: ChoiceBox) -> Result<usize, ResolveError> {
        let choice = self.current_choice(ctx)?;
        let tags = ctx.mapper.tags_of(choice_box);
        let probes = tags
            .iter()
            .map(|tag| self.probe_current(ctx, choice, Modifiers::increase(tag.as_str())))
            .collect();

        first_positive("strength", probes, self.resolve_timeout).await
    }

    /// 频带判断：以下方每个标识作为 `affectValue` 验证当前音频
    async fn band(&self, ctx: &ResolveCtx<'_>) -> Result<usize, ResolveError> {
        let choice = self.current_choice(ctx)?;
        let tags = ctx.mapper.tags_of(ChoiceBox::Lower);
        let probes = tags
            .iter()
            .map(|tag| self.probe_current(ctx, choice, Modifiers::affect(tag.as_str())))
            .collect();

        first_positive("band", probes, self.resolve_timeout).await
    }

    async fn probe_current(
        &self,
        ctx: &ResolveCtx<'_>,
        choice: &Choice,
        modifiers: Modifiers,
    ) -> Result<bool, NetworkError> {
        // 强弱 / 频带类题目使用选项自身的考核ID，而不是题目的
        self.oracle
            .verify(&Probe {
                test_id: ctx.test_id,
                test_type: ctx.test_type,
                examine_id: &choice.examine_id,
                timestamp: &ctx.question.timestamp,
                choice,
                modifiers,
            })
            .await
    }

    /// 当前正在播放的音频对应的选项数据
    fn current_choice<'c>(&self, ctx: &ResolveCtx<'c>) -> Result<&'c Choice, ResolveError> {
        let filename = ctx
            .mapper
            .filename_for(ctx.current_music_id)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                ResolveError::lookup_miss(format!("页面上没有加密ID为 {} 的音频", ctx.current_music_id))
            })?;

        // 以 "/文件名" 查找，避免 a.mp3 误中 ba.mp3
        ctx.test
            .find_by_substring(ChoiceField::MusicPath, &format!("/{}", filename))
            .ok_or_else(|| ResolveError::lookup_miss(format!("题目数据中没有音频文件 {}", filename)))
    }
}
