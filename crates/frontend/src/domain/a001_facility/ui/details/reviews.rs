use contracts::domain::a006_review::{rating_summary, ReviewRequest, MAX_COMMENT_LEN};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::view_model::FacilityDetailsViewModel;
use crate::domain::a006_review::api;
use crate::shared::api_utils::use_scoped_api;
use crate::shared::date_utils::format_datetime;
use crate::shared::toast::{notify_api_error, use_notifications};

#[component]
pub fn ReviewsSection(vm: FacilityDetailsViewModel) -> impl IntoView {
    let api = use_scoped_api();
    let notifications = use_notifications();
    let rating = RwSignal::new(0u8);
    let comment = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);

    let summary = Memo::new(move |_| vm.reviews.with(|r| rating_summary(r)));
    let remaining = move || MAX_COMMENT_LEN as i64 - comment.with(|c| c.chars().count() as i64);

    let request = move || ReviewRequest {
        facility_id: vm.id,
        rating: rating.get(),
        comment: comment.get().trim().to_string(),
    };
    let can_submit = Signal::derive(move || !submitting.get() && request().validate().is_ok());

    let submit = move |_| {
        let req = request();
        if let Err(e) = req.validate() {
            notifications.error(e);
            return;
        }
        let api = api.clone();
        submitting.set(true);
        spawn_local(async move {
            match api::submit_review(&api, &req).await {
                Ok(_) => {
                    notifications.success("Thanks for your review");
                    rating.set(0);
                    comment.set(String::new());
                    vm.reload_reviews(api, notifications);
                }
                Err(e) => notify_api_error(notifications, "Submit review", &e),
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="details-section reviews">
            <h2 class="details-section__title">"Reviews"</h2>
            <div class="reviews__summary">
                {move || summary.with(|s| {
                    if s.count == 0 {
                        view! { <span class="reviews__empty">"No reviews yet"</span> }.into_any()
                    } else {
                        let bars = s.histogram.iter().enumerate().rev().map(|(i, n)| {
                            let pct = *n as f64 * 100.0 / s.count as f64;
                            view! {
                                <div class="reviews__bar">
                                    <span>{format!("{}★", i + 1)}</span>
                                    <div class="reviews__bar-track">
                                        <div class="reviews__bar-fill" style=format!("width: {pct:.0}%")></div>
                                    </div>
                                    <span>{*n}</span>
                                </div>
                            }
                        }).collect_view();
                        view! {
                            <div class="reviews__average">
                                <span class="reviews__average-value">{format!("{:.1}", s.average)}</span>
                                <span>{format!("{} review(s)", s.count)}</span>
                            </div>
                            <div class="reviews__histogram">{bars}</div>
                        }.into_any()
                    }
                })}
            </div>

            <div class="review-form">
                <div class="review-form__stars">
                    {(1..=5u8).map(|n| view! {
                        <button
                            class=move || {
                                if rating.get() >= n {
                                    "review-form__star review-form__star--on"
                                } else {
                                    "review-form__star"
                                }
                            }
                            title=format!("{n} star(s)")
                            on:click=move |_| rating.set(n)
                        >
                            "★"
                        </button>
                    }).collect_view()}
                </div>
                <textarea
                    class="review-form__comment"
                    rows="3"
                    placeholder="Share your experience (optional)"
                    prop:value=move || comment.get()
                    on:input=move |ev| comment.set(event_target_value(&ev))
                ></textarea>
                <div class="review-form__footer">
                    <span class="review-form__counter" class:review-form__counter--over=move || remaining() < 0>
                        {move || format!("{} characters left", remaining())}
                    </span>
                    <Button appearance=ButtonAppearance::Primary disabled=Signal::derive(move || !can_submit.get()) on_click=submit>
                        {move || if submitting.get() { "Submitting..." } else { "Submit review" }}
                    </Button>
                </div>
            </div>

            <ul class="reviews__list">
                {move || vm.reviews.get().into_iter().map(|r| view! {
                    <li class="review">
                        <div class="review__header">
                            <span class="review__author">{r.author().to_string()}</span>
                            <span class="review__stars">{r.stars()}</span>
                            <span class="review__date">{format_datetime(r.created_at.as_ref())}</span>
                        </div>
                        {r.comment.clone().filter(|c| !c.trim().is_empty()).map(|c| view! {
                            <p class="review__comment">{c}</p>
                        })}
                    </li>
                }).collect_view()}
            </ul>
        </section>
    }
}
