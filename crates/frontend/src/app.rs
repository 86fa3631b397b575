use leptos::prelude::*;

use crate::domain::damaged_goods::ui::list::DamagedGoodsList;
use crate::domain::employees::ui::list::EmployeesList;
use crate::domain::purchase_orders::ui::list::PurchaseOrdersList;
use crate::layout::header::{DivisionGate, DivisionSelect};
use crate::shared::division::DivisionProvider;
use crate::shared::list_controller::refresh::provide_refresh_registry;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Screen {
    DamagedGoods,
    PurchaseOrders,
    Employees,
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <DivisionProvider>
            <AppShell />
        </DivisionProvider>
    }
}

#[component]
fn AppShell() -> impl IntoView {
    provide_refresh_registry();
    let screen = RwSignal::new(Screen::DamagedGoods);

    let nav_class = move |target: Screen| {
        if screen.get() == target {
            "nav-btn nav-btn--active"
        } else {
            "nav-btn"
        }
    };

    view! {
        <header class="app-header">
            <h1>"Console"</h1>
            <nav class="app-nav">
                <button
                    class=move || nav_class(Screen::DamagedGoods)
                    on:click=move |_| screen.set(Screen::DamagedGoods)
                >
                    "Damaged goods"
                </button>
                <button
                    class=move || nav_class(Screen::PurchaseOrders)
                    on:click=move |_| screen.set(Screen::PurchaseOrders)
                >
                    "Purchase orders"
                </button>
                <button
                    class=move || nav_class(Screen::Employees)
                    on:click=move |_| screen.set(Screen::Employees)
                >
                    "Employees"
                </button>
            </nav>
            <DivisionSelect />
        </header>
        <main class="app-main">
            <DivisionGate>
                {move || match screen.get() {
                    Screen::DamagedGoods => view! { <DamagedGoodsList /> }.into_any(),
                    Screen::PurchaseOrders => view! { <PurchaseOrdersList /> }.into_any(),
                    Screen::Employees => view! { <EmployeesList /> }.into_any(),
                }}
            </DivisionGate>
        </main>
    }
}
